//! services/engine/src/parser.rs
//!
//! Parses the raw text returned by the generative endpoint into flashcard
//! drafts. The model is asked for a JSON array of front/back objects;
//! anything else fails the whole call. There is no partial salvage:
//! silently dropping half the cards would be worse than an explicit
//! failure the caller can retry.

use recall_core::domain::FlashcardDraft;

use crate::error::EngineError;

pub fn parse_drafts(text: &str) -> Result<Vec<FlashcardDraft>, EngineError> {
    if text.trim().is_empty() {
        return Err(EngineError::MalformedOutput(
            "the model returned no text".to_string(),
        ));
    }

    let drafts: Vec<FlashcardDraft> = serde_json::from_str(text).map_err(|e| {
        EngineError::MalformedOutput(format!(
            "expected a JSON array of front/back pairs: {}",
            e
        ))
    })?;

    for (index, draft) in drafts.iter().enumerate() {
        if draft.front.trim().is_empty() || draft.back.trim().is_empty() {
            return Err(EngineError::MalformedOutput(format!(
                "card {} has an empty front or back",
                index
            )));
        }
    }

    Ok(drafts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cards_in_input_order() {
        let drafts =
            parse_drafts(r#"[{"front":"Q1","back":"A1"},{"front":"Q2","back":"A2"}]"#).unwrap();
        assert_eq!(drafts.len(), 2);
        assert_eq!(drafts[0].front, "Q1");
        assert_eq!(drafts[0].back, "A1");
        assert_eq!(drafts[1].front, "Q2");
        assert_eq!(drafts[1].back, "A2");
    }

    #[test]
    fn extra_fields_are_ignored() {
        let drafts =
            parse_drafts(r#"[{"front":"Q","back":"A","difficulty":"easy"}]"#).unwrap();
        assert_eq!(drafts.len(), 1);
    }

    #[test]
    fn empty_text_is_malformed() {
        assert!(matches!(
            parse_drafts(""),
            Err(EngineError::MalformedOutput(_))
        ));
        assert!(matches!(
            parse_drafts("   \n"),
            Err(EngineError::MalformedOutput(_))
        ));
    }

    #[test]
    fn prose_is_malformed() {
        assert!(matches!(
            parse_drafts("Here are your flashcards!"),
            Err(EngineError::MalformedOutput(_))
        ));
    }

    #[test]
    fn non_array_json_is_malformed() {
        assert!(matches!(
            parse_drafts(r#"{"front":"Q","back":"A"}"#),
            Err(EngineError::MalformedOutput(_))
        ));
    }

    #[test]
    fn missing_field_is_malformed() {
        assert!(matches!(
            parse_drafts(r#"[{"front":"Q"}]"#),
            Err(EngineError::MalformedOutput(_))
        ));
    }

    #[test]
    fn empty_front_or_back_is_malformed() {
        assert!(matches!(
            parse_drafts(r#"[{"front":"Q","back":" "}]"#),
            Err(EngineError::MalformedOutput(_))
        ));
    }
}
