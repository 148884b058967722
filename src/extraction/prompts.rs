pub const EXTRACT_SYSTEM: &str = "You are a helpful assistant that extracts food items and quantities from text. \
Handle vague descriptions and common measurements. Always respond with valid JSON only.";

pub const CLARIFY_SYSTEM: &str =
    "You are a helpful nutrition assistant. Help clarify vague food inputs.";

pub const EXTRACT_MAX_TOKENS: u32 = 300;
pub const CLARIFY_MAX_TOKENS: u32 = 150;
pub const TEMPERATURE: f64 = 0.1;

/// Portion idioms and the amounts the model should assume for them.
const PORTION_GLOSSARY: &[(&str, &str)] = &[
    ("hand-sized", "3-4 oz (85-113g) for meat/fish"),
    ("palm-sized", "3 oz (85g) for meat/fish"),
    ("fist-sized", "1 cup (240ml) for rice/pasta"),
    ("thumb-sized", "1 tbsp (15ml) for butter/oil"),
    ("deck of cards", "3 oz (85g) for meat"),
    ("tennis ball", "1 cup (240ml) for fruits/vegetables"),
    ("baseball", "1 cup (240ml) for fruits/vegetables"),
    ("golf ball", "2 tbsp (30ml) for nuts/seeds"),
];

const VAGUE_DEFAULTS: &[(&str, &str)] = &[
    ("some chicken", "4 oz (113g)"),
    ("a bit of rice", "1/2 cup (120ml)"),
    ("some vegetables", "1 cup (240ml)"),
];

fn bullet_list(entries: &[(&str, &str)]) -> String {
    entries
        .iter()
        .map(|(phrase, amount)| format!("- \"{}\" = {}", phrase, amount))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn extraction_prompt(utterance: &str) -> String {
    format!(
        r#"Extract food items and their quantities from this text: "{utterance}"

Handle common measurements and vague descriptions:
{portions}

For vague items like "some chicken" or "a bit of rice", use reasonable defaults:
{defaults}

Return a JSON array of objects with 'food', 'quantity', and 'measurement' fields.
For quantities, use the estimated amount in grams or ml.
For measurements, include the original description.

Example output:
[
    {{"food": "chicken thigh", "quantity": 113, "measurement": "hand-sized"}},
    {{"food": "rice", "quantity": 120, "measurement": "1/2 cup"}}
]

Only return the JSON array, nothing else."#,
        utterance = utterance,
        portions = bullet_list(PORTION_GLOSSARY),
        defaults = bullet_list(VAGUE_DEFAULTS),
    )
}

pub fn clarification_prompt(utterance: &str) -> String {
    format!(
        r#"The user said: "{utterance}"
This input seems vague or unclear. Please suggest what specific food items they might be referring to.
Return a JSON object with 'needs_clarification' set to true and 'suggestions' as an array of possible foods.
Example:
{{"needs_clarification": true, "suggestions": ["chicken breast", "rice", "vegetables"]}}"#,
        utterance = utterance,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_embeds_utterance_and_glossary() {
        let p = extraction_prompt("a handful of rice and some chicken");
        assert!(p.contains("\"a handful of rice and some chicken\""));
        assert!(p.contains("- \"palm-sized\" = 3 oz (85g) for meat/fish"));
        assert!(p.contains("- \"golf ball\" = 2 tbsp (30ml) for nuts/seeds"));
        assert!(p.contains("- \"some chicken\" = 4 oz (113g)"));
        assert!(p.contains(r#"{"food": "rice", "quantity": 120, "measurement": "1/2 cup"}"#));
    }

    #[test]
    fn clarification_prompt_shows_expected_shape() {
        let p = clarification_prompt("stuff");
        assert!(p.starts_with("The user said: \"stuff\""));
        assert!(p.contains(r#"{"needs_clarification": true, "suggestions": ["#));
    }
}
