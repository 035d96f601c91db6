//! Splits eulogy text into speech-bubble sized pieces.

const MAX_SENTENCE_WORDS: usize = 15;
const RUN_WORDS: usize = 10;
const CONTINUATION_SUFFIX: &str = "...";

/// Breaks `text` into sentences ending in `.`, `!` or `?` (a trailing
/// unterminated sentence is kept). Sentences longer than 15 words are cut
/// into runs of 10 words; every run but the last ends in `...`.
///
/// Whitespace-only input produces no chunks. Input with no sentence at all
/// (only punctuation) comes back as a single trimmed chunk.
pub(crate) fn chunk_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    for sentence in split_sentences(text) {
        push_sentence(&mut chunks, sentence.trim());
    }
    if chunks.is_empty() {
        let whole = text.trim();
        if !whole.is_empty() {
            chunks.push(whole.to_string());
        }
    }
    chunks
}

fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start: Option<usize> = None;
    let mut in_terminators = false;

    for (index, character) in text.char_indices() {
        let is_terminator = matches!(character, '.' | '!' | '?');
        match start {
            None if is_terminator => {}
            None => {
                start = Some(index);
                in_terminators = false;
            }
            Some(sentence_start) if !is_terminator && in_terminators => {
                sentences.push(&text[sentence_start..index]);
                start = Some(index);
                in_terminators = false;
            }
            Some(_) => in_terminators |= is_terminator,
        }
    }
    if let Some(sentence_start) = start {
        sentences.push(&text[sentence_start..]);
    }
    sentences
}

fn push_sentence(chunks: &mut Vec<String>, sentence: &str) {
    if sentence.is_empty() {
        return;
    }
    let words: Vec<&str> = sentence.split_whitespace().collect();
    if words.len() <= MAX_SENTENCE_WORDS {
        chunks.push(sentence.to_string());
        return;
    }

    let run_count = words.len().div_ceil(RUN_WORDS);
    for (run_index, run) in words.chunks(RUN_WORDS).enumerate() {
        let mut chunk = run.join(" ");
        if run_index + 1 < run_count {
            chunk.push_str(CONTINUATION_SUFFIX);
        }
        chunks.push(chunk);
    }
}
