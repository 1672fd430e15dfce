//! 後処理の性質テスト
//!
//! 実際のGemini応答に近いテキストで normalize / 抽出処理の性質を確認

use plant_ai_common::postprocess::{KEYWORD_LIMIT, PROPERTY_LIMIT, STOP_WORDS};
use plant_ai_common::{extract_keywords, extract_properties, extract_questions, normalize};

const RESPONSES: &[&str] = &[
    "## Identification\n\n**NAME:** Aloe Vera\n**SPECIES:** Aloe barbadensis miller\n**FAMILY:** Asphodelaceae\n\n* Thick, fleshy leaves\n* Serrated margins\n\n\n\nAloe stores water in its leaves.",
    "```\nThis appears to be a *Monstera deliciosa*, also known as the Swiss cheese plant.\n```",
    "I could not find a plant in this photo. Please try again with a clearer image.",
    "Related Questions:\n1. How often should I water it?\n2. Does it need direct sunlight?\n3. Is it safe for dogs?",
    "- - -\n###\n__**Rosemary**__ (Salvia rosmarinus)\n\n+ LIGHT: full sun\n+ WATER: sparingly\n+ SOIL: sandy\n+ ZONE: 7-10\n+ HEIGHT: 1-2 m\n+ SPREAD: 1 m",
    "",
];

#[test]
fn test_normalize_is_idempotent_on_realistic_responses() {
    for response in RESPONSES {
        let once = normalize(response);
        assert_eq!(normalize(&once), once, "冪等でない: {:?}", response);
    }
}

#[test]
fn test_keywords_are_capped_and_never_stop_words() {
    for response in RESPONSES {
        let keywords = extract_keywords(&normalize(response));
        assert!(keywords.len() <= KEYWORD_LIMIT);
        for keyword in &keywords {
            assert!(
                !STOP_WORDS.contains(&keyword.to_lowercase().as_str()),
                "ストップワードが含まれる: {}",
                keyword
            );
        }
    }
}

#[test]
fn test_properties_are_colon_lines_in_order() {
    let properties = extract_properties(&normalize(RESPONSES[4]));
    assert_eq!(properties.len(), PROPERTY_LIMIT);
    assert_eq!(
        properties,
        vec![
            "LIGHT: full sun",
            "WATER: sparingly",
            "SOIL: sandy",
            "ZONE: 7-10",
            "HEIGHT: 1-2 m",
        ]
    );
}

#[test]
fn test_aloe_care_sheet_yields_two_properties() {
    let properties = extract_properties("NAME: Aloe Vera\nSPECIES: Aloe barbadensis\n...");
    assert_eq!(properties, vec!["NAME: Aloe Vera", "SPECIES: Aloe barbadensis"]);
}

#[test]
fn test_questions_follow_marker() {
    let questions = extract_questions(&normalize(RESPONSES[3]));
    assert_eq!(questions.len(), 3);
    assert_eq!(questions[2], "Is it safe for dogs?");

    assert!(extract_questions(&normalize(RESPONSES[2])).is_empty());
}
