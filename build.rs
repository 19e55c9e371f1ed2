use std::path::Path;

fn main() {
    let corpus_path = Path::new("corpus/cases.json");
    validate_corpus_file(corpus_path);
    set_build_dependencies();
}

fn validate_corpus_file(corpus_path: &Path) {
    // Ensure corpus exists at build time
    assert!(
        corpus_path.exists(),
        "\n\nCORPUS BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the corpus file before building.\n",
        corpus_path.display()
    );

    // Read corpus file
    let corpus_contents = std::fs::read_to_string(corpus_path).unwrap_or_else(|e| {
        panic!(
            "\n\nCORPUS BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            corpus_path.display()
        );
    });

    // Parse and validate JSON
    let corpus: serde_json::Value = serde_json::from_str(&corpus_contents).unwrap_or_else(|e| {
        panic!(
            "\n\nCORPUS BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            corpus_path.display()
        );
    });

    validate_corpus_structure(&corpus);
}

fn validate_corpus_structure(corpus: &serde_json::Value) {
    // Validate structure
    assert!(
        corpus.is_object(),
        "\n\nCORPUS BUILD ERROR: Root must be a JSON object\n\
         Got: {corpus}\n"
    );

    let cases = corpus.get("cases").unwrap_or_else(|| {
        panic!(
            "\n\nCORPUS BUILD ERROR: Missing 'cases' field\n\
             The corpus must have a top-level 'cases' array.\n"
        );
    });

    let cases = cases.as_array().unwrap_or_else(|| {
        panic!(
            "\n\nCORPUS BUILD ERROR: 'cases' must be an array\n\
             Got: {cases}\n"
        );
    });

    // Validate each case
    let total_clues = validate_cases(cases);

    println!(
        "cargo:warning=Validated corpus: {} cases, {total_clues} total clues",
        cases.len()
    );
}

fn validate_cases(cases: &[serde_json::Value]) -> usize {
    let mut total_clues = 0;

    for (i, case) in cases.iter().enumerate() {
        let case_id = case.get("id").and_then(|v| v.as_str()).unwrap_or("<unknown>");

        validate_case_fields(case, case_id, i);
        total_clues += validate_case_clues(case, case_id);
        validate_case_solution(case, case_id);
    }

    total_clues
}

fn validate_case_fields(case: &serde_json::Value, case_id: &str, index: usize) {
    assert!(
        case.get("id").is_some(),
        "\n\nCORPUS BUILD ERROR: Case at index {index} missing 'id' field\n"
    );
    assert!(
        case.get("title").is_some(),
        "\n\nCORPUS BUILD ERROR: Case '{case_id}' (index {index}) missing 'title' field\n"
    );
    assert!(
        case.get("clues").is_some(),
        "\n\nCORPUS BUILD ERROR: Case '{case_id}' (index {index}) missing 'clues' field\n"
    );
    assert!(
        case.get("solution").is_some(),
        "\n\nCORPUS BUILD ERROR: Case '{case_id}' (index {index}) missing 'solution' field\n"
    );
}

fn validate_case_clues(case: &serde_json::Value, case_id: &str) -> usize {
    let Some(clues) = case.get("clues").and_then(|c| c.as_array()) else {
        return 0;
    };

    assert!(
        !clues.is_empty(),
        "\n\nCORPUS BUILD ERROR: Case '{case_id}' has no clues\n\
         Every case needs at least one clue to reveal.\n"
    );

    // Clue ids must run 1..=N in order; the reveal sequence depends on it
    for (j, clue) in clues.iter().enumerate() {
        let expected = (j + 1) as u64;
        let id = clue.get("id").and_then(serde_json::Value::as_u64);
        assert!(
            id == Some(expected),
            "\n\nCORPUS BUILD ERROR: Case '{case_id}' clue at position {j} has id {id:?}, expected {expected}\n\
             Clue ids must be 1..=N with no gaps, in order of significance.\n"
        );
        assert!(
            clue.get("content").and_then(|v| v.as_str()).is_some_and(|s| !s.trim().is_empty()),
            "\n\nCORPUS BUILD ERROR: Case '{case_id}' clue {expected} missing or empty 'content'\n"
        );
    }

    clues.len()
}

fn validate_case_solution(case: &serde_json::Value, case_id: &str) {
    let Some(solution) = case.get("solution") else {
        return;
    };

    assert!(
        solution
            .get("diagnosis")
            .and_then(|v| v.as_str())
            .is_some_and(|s| !s.trim().is_empty()),
        "\n\nCORPUS BUILD ERROR: Case '{case_id}' solution missing 'diagnosis'\n"
    );

    let keywords = solution.get("keywords").and_then(|k| k.as_array());
    assert!(
        keywords.is_some_and(|k| !k.is_empty()),
        "\n\nCORPUS BUILD ERROR: Case '{case_id}' solution has no keywords\n\
         The matcher needs at least one keyword to grade against.\n"
    );

    for (j, keyword) in keywords.into_iter().flatten().enumerate() {
        assert!(
            keyword.as_str().is_some_and(|s| !s.trim().is_empty()),
            "\n\nCORPUS BUILD ERROR: Case '{case_id}' keyword at index {j} is missing or empty\n"
        );
    }
}

fn set_build_dependencies() {
    // Tell cargo to rerun if corpus changes
    println!("cargo:rerun-if-changed=corpus/cases.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
