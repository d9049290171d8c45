//! Property tests for label decomposition, naming and typing rules

use erdgen::core::{decompose_label, to_camel_case, Entity, Field, FieldType};
use erdgen::plugins::java::JavaRenderer;
use proptest::prelude::*;

/// Label segments: no newlines, may carry surrounding whitespace
fn segment() -> impl Strategy<Value = String> {
    "[ \t]{0,2}[A-Za-z0-9 :*_]{0,12}[ \t]{0,2}"
}

fn identifier() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z]{0,10}"
}

proptest! {
    #[test]
    fn two_line_labels_split_at_the_newline(name in segment(), cardinality in segment()) {
        let (rel, card) = decompose_label(&format!("{name}\n{cardinality}"));

        let expected = if name.trim().is_empty() { "related" } else { name.trim() };
        prop_assert_eq!(rel, expected);
        if cardinality.trim().is_empty() {
            prop_assert_eq!(card, "1 : 1");
        } else {
            prop_assert_eq!(card, cardinality.trim());
        }
    }

    #[test]
    fn one_line_labels_default_the_cardinality(label in segment()) {
        let (rel, card) = decompose_label(&label);

        let expected = if label.trim().is_empty() { "related" } else { label.trim() };
        prop_assert_eq!(rel, expected);
        prop_assert_eq!(card, "1 : 1");
    }

    #[test]
    fn star_on_the_right_is_a_list(left in "[0-9*]{1,3}", target in identifier()) {
        let ty = FieldType::from_cardinality(&target, &format!("{left} : *"));
        prop_assert_eq!(ty.to_string(), format!("List<{target}>"));
    }

    #[test]
    fn digits_on_the_right_are_an_array(left in "[0-9*]{1,3}", count in 2u32..1000, target in identifier()) {
        let ty = FieldType::from_cardinality(&target, &format!("{left} : {count}"));
        prop_assert_eq!(ty.to_string(), format!("{target}[]"));
    }

    #[test]
    fn one_on_the_right_is_a_scalar(left in "[0-9*]{1,3}", target in identifier()) {
        let ty = FieldType::from_cardinality(&target, &format!("{left} : 1"));
        prop_assert_eq!(ty.to_string(), target);
    }

    #[test]
    fn without_exactly_one_colon_the_type_is_scalar(text in "[^:]{0,10}(:[^:]{0,4}:[^:]{0,4})?", target in identifier()) {
        let ty = FieldType::from_cardinality(&target, &text);
        prop_assert_eq!(ty, FieldType::Scalar(target));
    }

    #[test]
    fn camel_case_is_an_identifier(text in "[A-Za-z _-]{0,24}") {
        let name = to_camel_case(&text);

        prop_assert!(!name.is_empty());
        prop_assert!(name.chars().all(|c| c.is_ascii_alphabetic()));
        prop_assert!(name.chars().next().is_some_and(|c| c.is_ascii_lowercase()));
    }

    #[test]
    fn camel_case_is_idempotent(text in "[A-Za-z _-]{0,24}") {
        let once = to_camel_case(&text);
        prop_assert_eq!(to_camel_case(&once), once);
    }

    #[test]
    fn rendering_is_deterministic(
        name in identifier(),
        fields in prop::collection::vec((identifier(), identifier(), 0usize..3), 0..5),
    ) {
        let mut entity = Entity::new("x", &name);
        for (field_name, target, kind) in &fields {
            let field_type = match kind {
                0 => FieldType::Scalar(target.clone()),
                1 => FieldType::List(target.clone()),
                _ => FieldType::Array(target.clone()),
            };
            entity.add_field(Field::new(to_camel_case(field_name), field_type, "1 : 1"));
        }

        let renderer = JavaRenderer::new();
        let first = renderer.render_entity(&entity);
        prop_assert_eq!(&first, &renderer.render_entity(&entity.clone()));
        prop_assert_eq!(first.contains("import java.util.List;"), entity.has_list_field());
        prop_assert!(first.ends_with('}'), "rendered class must end with a closing brace");
    }
}
