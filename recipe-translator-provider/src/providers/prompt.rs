//! Prompt construction for recipe translation
//!
//! Terminology rules are fixed per target language and are not
//! configurable: Spanish output is always Castilian (Spain), English output
//! always uses US kitchen conventions.

use crate::types::{ContentType, Language, TranslatableContent};

/// A chat prompt split into system instructions and user payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

const CASTILIAN_RULES: &str = "Write in Castilian Spanish as used in Spain (es-ES), never Latin American variants. \
Use Spain's kitchen vocabulary: patata (not papa), zumo (not jugo), nata (not crema de leche), \
judías verdes (not ejotes or chauchas), melocotón (not durazno), gambas (not camarones), \
guisantes (not arvejas), maíz (not elote or choclo), pimiento (not ají or chile morrón), \
fresa (not frutilla), mantequilla (not manteca), bol (not tazón), nevera or frigorífico (not heladera), \
fregar (not lavar los trastes). Address the reader with the informal \"tú\" imperative.";

const US_ENGLISH_RULES: &str = "Write in American English. Use US kitchen vocabulary: \
cilantro (not coriander leaves), eggplant (not aubergine), zucchini (not courgette), \
bell pepper (not capsicum), heavy cream (not double cream), powdered sugar (not icing sugar), \
cookie (not biscuit), stove (not hob), skillet or frying pan, plastic wrap (not cling film). \
Use the imperative mood for steps.";

fn terminology_rules(target: Language) -> &'static str {
    match target {
        Language::Es => CASTILIAN_RULES,
        Language::En => US_ENGLISH_RULES,
    }
}

fn format_rules(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Name => {
            "You will receive the title of a household recipe (cooking, cleaning or shopping). \
Reply with the translated title only, as plain text on a single line, \
without quotes, labels or explanations."
        }
        ContentType::Ingredients => {
            "You will receive a JSON array of ingredient objects with the keys \"name\", \"amount\" and \"unit\". \
Translate only the \"name\" values. Copy \"amount\" and \"unit\" exactly as given. \
Reply with a JSON array only, with exactly the same number of elements in the same order, \
and nothing before or after it."
        }
        ContentType::Instructions => {
            "You will receive a JSON array of strings, one recipe step per element. \
Translate every step. Reply with a JSON array of strings only, \
with exactly the same number of elements in the same order, and nothing before or after it."
        }
    }
}

/// Build the prompt for one field group.
pub fn build_prompt(
    content: &TranslatableContent,
    source: Language,
    target: Language,
) -> Prompt {
    let content_type = content.content_type();
    let system = format!(
        "You are a professional translator of recipes. Translate from {} to {}.\n\n{}\n\n{}",
        source.display_name(),
        target.display_name(),
        format_rules(content_type),
        terminology_rules(target),
    );

    let payload = content.to_json();
    let user = if content_type.expects_array() {
        payload.to_string()
    } else {
        payload.as_str().unwrap_or_default().trim().to_string()
    };

    Prompt { system, user }
}
