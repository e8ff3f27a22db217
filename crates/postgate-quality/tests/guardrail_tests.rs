//! Integration tests for the standard guardrail profile.

use postgate_quality::{validate, GuardrailProfile, Guardrails, Posts, Rule, Severity};

fn posts(linkedin: &str, twitter: &str, instagram: &str, facebook: &str) -> Posts {
    [
        ("linkedin", linkedin),
        ("twitter", twitter),
        ("instagram", instagram),
        ("facebook", facebook),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn valid_posts() -> Posts {
    posts(
        "Excited to announce our new marketing automation platform! Learn how to streamline your social media strategy.",
        "New: AutoMarket OS - AI-powered marketing campaigns in minutes. #marketing #automation",
        "Transform your marketing with AI 🚀 Automated content generation for LinkedIn, Twitter, Instagram & Facebook.",
        "Introducing AutoMarket OS - the fastest way to create and schedule multi-platform marketing campaigns.",
    )
}

// =============================================================================
// Verdicts
// =============================================================================

#[test]
fn test_accepts_valid_posts() {
    let result = validate(&valid_posts());

    assert!(result.is_valid);
    assert_eq!(result.completeness_score, 100);
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.can_publish);
    assert_eq!(result.posts, valid_posts());
}

#[test]
fn test_rejects_banned_phrases() {
    let result = validate(&posts(
        "In today's fast-paced world, we are a game-changer in marketing automation.",
        "Check out our synergy platform!",
        "Revolutionary product launching this week",
        "This is a paradigm shift for small teams",
    ));

    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![
            "linkedin: Contains banned phrase \"in today's fast-paced world\"",
            "linkedin: Contains banned phrase \"game-changer\"",
            "twitter: Contains banned phrase \"synergy\"",
            "instagram: Contains banned phrase \"revolutionary\"",
            "facebook: Contains banned phrase \"paradigm shift\"",
        ]
    );
    assert_eq!(result.completeness_score, 0);
    assert!(!result.can_publish);
}

#[test]
fn test_banned_phrase_is_case_insensitive() {
    let mut input = valid_posts();
    input.insert(
        "linkedin".to_string(),
        "Our scheduler is a real GAME-CHANGER for busy marketing teams.".to_string(),
    );

    let result = validate(&input);
    assert_eq!(result.errors, vec!["linkedin: Contains banned phrase \"game-changer\""]);
    assert_eq!(result.completeness_score, 75);
}

#[test]
fn test_banned_phrase_matches_inside_words() {
    let mut input = valid_posts();
    input.insert(
        "facebook".to_string(),
        "We help you leverage-free your budget with smarter planning.".to_string(),
    );
    let result = validate(&input);
    assert_eq!(result.errors, vec!["facebook: Contains banned phrase \"leverage\""]);
}

#[test]
fn test_over_length_is_a_warning() {
    let mut input = valid_posts();
    input.insert("twitter".to_string(), "B".repeat(281));

    let result = validate(&input);
    assert_eq!(result.warnings, vec!["twitter: Exceeds recommended length (281/280 chars)"]);
    assert!(result.errors.is_empty());
    assert!(result.is_valid);
    assert!(result.can_publish);
}

#[test]
fn test_every_channel_over_length() {
    let result = validate(&posts(
        &"A".repeat(3001),
        &"B".repeat(281),
        &"C".repeat(2201),
        &"D".repeat(63207),
    ));

    assert!(result.is_valid);
    assert_eq!(
        result.warnings,
        vec![
            "linkedin: Exceeds recommended length (3001/3000 chars)",
            "twitter: Exceeds recommended length (281/280 chars)",
            "instagram: Exceeds recommended length (2201/2200 chars)",
            "facebook: Exceeds recommended length (63207/63206 chars)",
        ]
    );
    assert_eq!(result.completeness_score, 100);
}

#[test]
fn test_length_at_limits() {
    let result = validate(&posts(
        &"A".repeat(3000),
        &"B".repeat(10),
        &"C".repeat(2200),
        &"D".repeat(20),
    ));
    assert!(result.errors.is_empty());
    assert!(result.warnings.is_empty());
    assert!(result.can_publish);
}

#[test]
fn test_rejects_empty_post() {
    let result = validate(&posts(
        "",
        "Valid tweet",
        "Valid Instagram post",
        "Valid Facebook posting",
    ));

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["linkedin: Missing content"]);
    assert_eq!(result.completeness_score, 75);
    assert!(!result.can_publish);
}

#[test]
fn test_absent_channel_is_missing() {
    let mut input = valid_posts();
    input.remove("instagram");
    let result = validate(&input);
    assert_eq!(result.errors, vec!["instagram: Missing content"]);
}

#[test]
fn test_too_short_content() {
    let result = validate(&posts("Short", "Hi", "Post", "Text"));

    assert!(!result.is_valid);
    assert_eq!(
        result.errors,
        vec![
            "linkedin: Too short (5 chars, minimum 20)",
            "twitter: Too short (2 chars, minimum 10)",
            "instagram: Too short (4 chars, minimum 20)",
            "facebook: Too short (4 chars, minimum 20)",
        ]
    );
    assert_eq!(result.completeness_score, 0);
}

#[test]
fn test_whitespace_only_content() {
    let result = validate(&posts(
        "   \n\t   ",
        "Valid tweet",
        "Valid Instagram post",
        "Valid Facebook posting",
    ));

    assert!(!result.is_valid);
    assert!(result.errors.contains(&"linkedin: Content is whitespace only".to_string()));
}

#[test]
fn test_length_counts_utf16_units() {
    // 9 rockets = 18 UTF-16 units, below the LinkedIn minimum
    let result = validate(&posts(
        &"🚀".repeat(9),
        "Valid tweet",
        "Valid Instagram post",
        "Valid Facebook posting",
    ));
    assert_eq!(result.errors, vec!["linkedin: Too short (18 chars, minimum 20)"]);
}

// =============================================================================
// Score and publishability
// =============================================================================

#[test]
fn test_partial_posts_score() {
    let result = validate(&posts(
        "Valid LinkedIn post with sufficient content here",
        "Valid tweet",
        "",
        "Valid Facebook posting",
    ));

    assert_eq!(result.completeness_score, 75);
    assert!(!result.is_valid);
}

#[test]
fn test_requires_threshold_to_publish() {
    let result = validate(&posts(
        "Valid LinkedIn post with good content",
        "Valid tweet here",
        "Valid Instagram post",
        "",
    ));
    assert_eq!(result.completeness_score, 75);
    assert!(!result.can_publish);

    let result = validate(&posts(
        &"A".repeat(100),
        &"B".repeat(50),
        &"C".repeat(100),
        &"D".repeat(100),
    ));
    assert_eq!(result.completeness_score, 100);
    assert!(result.can_publish);
}

#[test]
fn test_score_is_monotonic() {
    let good = [
        "Valid LinkedIn post with good content",
        "Valid tweet here",
        "Valid Instagram post",
        "Valid Facebook posting",
    ];
    let mut texts = ["", "", "", ""];
    let mut last = validate(&posts(texts[0], texts[1], texts[2], texts[3])).completeness_score;
    assert_eq!(last, 0);

    for i in 0..4 {
        texts[i] = good[i];
        let score = validate(&posts(texts[0], texts[1], texts[2], texts[3])).completeness_score;
        assert!(score >= last);
        last = score;
    }
    assert_eq!(last, 100);
}

#[test]
fn test_can_publish_implies_is_valid() {
    let cases = [
        valid_posts(),
        posts("", "", "", ""),
        posts("Short", "Valid tweet", "Valid Instagram post", "Valid Facebook posting"),
        posts(&"A".repeat(5000), "Valid tweet", "synergy synergy synergy", "Valid Facebook posting"),
    ];
    for input in &cases {
        let result = validate(input);
        assert!(!result.can_publish || result.is_valid);
    }
}

#[test]
fn test_validation_is_idempotent() {
    let input = posts("Short", "B".repeat(300).as_str(), "", "A leverage post for you");
    assert_eq!(validate(&input), validate(&input));
}

// =============================================================================
// Structured findings
// =============================================================================

#[test]
fn test_findings_mirror_messages() {
    let mut input = posts("Short", "Valid tweet", "Valid Instagram post", "");
    input.insert("twitter".to_string(), "synergy ".repeat(40));
    let result = validate(&input);

    let rendered_errors: Vec<String> = result
        .findings
        .iter()
        .filter(|f| f.severity == Severity::Error)
        .map(|f| f.render())
        .collect();
    assert_eq!(rendered_errors, result.errors);

    let twitter: Vec<&Rule> = result.channel_findings("twitter").map(|f| &f.rule).collect();
    assert_eq!(
        twitter,
        vec![
            &Rule::BannedPhrase { phrase: "synergy".to_string() },
            &Rule::ExceedsLength { length: 320, maximum: 280 },
        ]
    );
}

#[test]
fn test_injected_profile() {
    let profile = GuardrailProfile::from_yaml(
        r#"
name: test@1.0
publish_threshold: 50
channels:
  - { name: twitter, min_chars: 3, max_chars: 10 }
  - { name: threads, min_chars: 3, max_chars: 10 }
banned_phrases: ["buy now"]
"#,
    )
    .unwrap();
    let gate = Guardrails::new(profile);

    let mut input = Posts::new();
    input.insert("twitter".to_string(), "Buy now!".to_string());
    input.insert("linkedin".to_string(), "ignored by this profile".to_string());

    let result = gate.validate(&input);
    assert_eq!(
        result.errors,
        vec!["twitter: Contains banned phrase \"buy now\"", "threads: Missing content"]
    );
    assert_eq!(result.completeness_score, 0);

    input.insert("twitter".to_string(), "Hello!".to_string());
    input.insert("threads".to_string(), "".to_string());
    let result = gate.validate(&input);
    assert_eq!(result.completeness_score, 50);
    assert!(!result.can_publish);
}
