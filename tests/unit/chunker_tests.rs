/*!
 * Tests for document chunking
 */

use transprep::app_config::ChunkerConfig;
use transprep::chunking::Chunker;

/// Chunker with a deliberately small bound so ordinary prose overflows
fn small_chunker(max_tokens: usize) -> Chunker {
    let config = ChunkerConfig {
        max_tokens,
        ..ChunkerConfig::default()
    };
    Chunker::with_defaults(config)
}

/// A multi-sentence mixed-script document used across tests
fn sample_document() -> String {
    let mut text = String::new();
    for i in 0..12 {
        text.push_str(&format!("This is English sentence number {} of the document. ", i));
        text.push_str("यह दस्तावेज़ का एक हिन्दी वाक्य है। ");
    }
    text
}

#[test]
fn test_chunk_withSmallDocument_shouldReturnSingleChunk() {
    let chunker = small_chunker(3500);
    let chunks = chunker.chunk("A short document. Nothing to split.");

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].id, 0);
    assert_eq!(chunks[0].start_offset, 0);
    assert!(chunks[0].overlap_prefix.is_none());
}

#[test]
fn test_chunk_withLongDocument_shouldKeepEveryChunkWithinBound() {
    let max_tokens = 25;
    let chunker = small_chunker(max_tokens);
    let chunks = chunker.chunk(&sample_document());

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(
            chunker.estimator().estimate(&chunk.text) <= max_tokens,
            "chunk {} estimates over the bound",
            chunk.id
        );
    }
}

#[test]
fn test_chunk_withLongDocument_shouldPreserveAllContentInOrder() {
    let chunker = small_chunker(25);
    let text = sample_document();
    let chunks = chunker.chunk(&text);

    let reassembled: String = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(reassembled, text);
}

#[test]
fn test_chunk_withSameInput_shouldBeDeterministic() {
    let chunker = small_chunker(25);
    let text = sample_document();

    let first = chunker.chunk(&text);
    let second = chunker.chunk(&text);
    assert_eq!(first, second);
}

#[test]
fn test_chunk_withLongDocument_shouldProduceMonotonicIdsAndOffsets() {
    let chunker = small_chunker(25);
    let chunks = chunker.chunk(&sample_document());

    for (i, pair) in chunks.windows(2).enumerate() {
        assert_eq!(pair[0].id + 1, pair[1].id);
        assert!(
            pair[0].start_offset <= pair[1].start_offset,
            "offsets out of order at chunk {}",
            i
        );
        assert_eq!(pair[0].end_offset, pair[1].start_offset);
    }
}

#[test]
fn test_chunk_withOverlap_shouldCarryTrailingContextForward() {
    let chunker = small_chunker(25);
    let chunks = chunker.chunk(&sample_document());

    assert!(chunks.len() > 1);
    for pair in chunks.windows(2) {
        let overlap = pair[1]
            .overlap_prefix
            .as_ref()
            .expect("non-first chunk should carry overlap");
        assert!(pair[0].text.ends_with(overlap.as_str()));

        // Overlap never counts toward the chunk's own token accounting
        assert_eq!(
            pair[1].token_count,
            chunker.estimator().estimate(&pair[1].text)
        );
    }
}

#[test]
fn test_chunk_withOversizedSentence_shouldEmitItWhole() {
    let max_tokens = 10;
    let chunker = small_chunker(max_tokens);

    // One unbroken sentence far above the bound, surrounded by small ones
    let giant = format!("{} end.", "word ".repeat(60));
    let text = format!("Small one. {}Another small one.", giant);
    let chunks = chunker.chunk(&text);

    let oversized: Vec<_> = chunks
        .iter()
        .filter(|c| chunker.estimator().estimate(&c.text) > max_tokens)
        .collect();
    assert_eq!(oversized.len(), 1, "exactly one oversized chunk expected");
    assert!(oversized[0].text.contains("word word"));

    // Nothing was dropped around it
    let reassembled: String = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(reassembled, text);
}

#[test]
fn test_chunk_withRespectSentencesDisabled_shouldCutAtTokenWindows() {
    let max_tokens = 25;
    let config = ChunkerConfig {
        max_tokens,
        respect_sentences: false,
        ..ChunkerConfig::default()
    };
    let chunker = Chunker::with_defaults(config);

    let text = sample_document();
    let chunks = chunker.chunk(&text);

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunker.estimator().estimate(&chunk.text) <= max_tokens);
    }
    let reassembled: String = chunks.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(reassembled, text);
}

#[test]
fn test_chunk_withEmptyText_shouldReturnNoChunks() {
    let chunker = small_chunker(3500);
    assert!(chunker.chunk("").is_empty());
}

#[test]
fn test_chunkWithPage_shouldTagEveryChunk() {
    let chunker = small_chunker(25);
    let chunks = chunker.chunk_with_page(&sample_document(), Some(3));

    assert!(chunks.iter().all(|c| c.page_number == Some(3)));
}
