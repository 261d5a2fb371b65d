use super::*;

#[test]
fn prompt_contains_the_fallback_instruction() {
    let prompt = build_prompt("a question", &[]);
    assert!(prompt.contains(FALLBACK_ANSWER));
}

#[test]
fn prompt_embeds_question_and_context_in_ranked_order() {
    let context = vec![
        "most relevant chunk".to_string(),
        "second chunk".to_string(),
        "third chunk".to_string(),
    ];

    let prompt = build_prompt("what color is the sky?", &context);

    assert!(prompt.contains("what color is the sky?"));
    let first = prompt.find("most relevant chunk").expect("first chunk present");
    let second = prompt.find("second chunk").expect("second chunk present");
    let third = prompt.find("third chunk").expect("third chunk present");
    assert!(first < second && second < third);
}

#[test]
fn context_chunks_are_embedded_verbatim() {
    let context = vec!["A chunk with \"quotes\" and\nnewlines kept as-is.".to_string()];
    let prompt = build_prompt("q", &context);
    assert!(prompt.contains("A chunk with \"quotes\" and\nnewlines kept as-is."));
}
