//! End-to-end conversion tests between the two formats.

use arbcodec::convert::arb_to_poe;
use arbcodec::convert::poe_to_arb::{Converter, ConverterOptions};
use arbcodec::{Error, Locale};
use indoc::indoc;
use proptest::prelude::*;

fn convert_poe(
    input: &str,
    template: bool,
    require_resource_attributes: bool,
    term_prefix: &str,
) -> (String, Result<(), Error>) {
    let options = ConverterOptions {
        locale: "en".parse().unwrap(),
        template,
        require_resource_attributes,
        term_prefix: term_prefix.to_string(),
    };

    let mut output = Vec::new();
    let result = Converter::new(options).convert(input, &mut output);
    (String::from_utf8(output).unwrap(), result)
}

#[test]
fn converts_template_with_placeholders_and_plurals() {
    let input = indoc! {r#"
        [
            {"term": "zebra", "term_plural": "", "definition": "Zebra"},
            {"term": "apple10", "term_plural": "", "definition": "Apple ten"},
            {"term": "apple2", "term_plural": "", "definition": "Apple two"},
            {"term": "greeting", "term_plural": "", "definition": "Hello, {name,String}!"},
            {"term": "birthday", "term_plural": "", "definition": "Born {date,DateTime,yMd}"},
            {
                "term": "items",
                "term_plural": "items",
                "definition": {"one": "{count} item", "other": "{count} items"}
            }
        ]
    "#};

    let (output, result) = convert_poe(input, true, false, "");
    result.unwrap();

    let expected = indoc! {r#"
        {
            "@@locale": "en",
            "apple2": "Apple two",
            "apple10": "Apple ten",
            "birthday": "Born {date}",
            "@birthday": {
                "placeholders": {
                    "date": {
                        "type": "DateTime",
                        "format": "yMd"
                    }
                }
            },
            "greeting": "Hello, {name}!",
            "@greeting": {
                "placeholders": {
                    "name": {
                        "type": "String"
                    }
                }
            },
            "items": "{count, plural, =1 {{count} item} other {{count} items}}",
            "@items": {
                "placeholders": {
                    "count": {}
                }
            },
            "zebra": "Zebra"
        }
    "#};
    assert_eq!(output, expected);
}

#[test]
fn non_template_strips_annotations_and_drops_empty() {
    let input = indoc! {r#"
        [
            {"term": "greeting", "term_plural": "", "definition": "Witaj, {name,String}!"},
            {"term": "untranslated", "term_plural": "", "definition": ""},
            {"term": "missing", "term_plural": "", "definition": null}
        ]
    "#};

    let (output, result) = convert_poe(input, false, false, "");
    result.unwrap();

    let expected = indoc! {r#"
        {
            "@@locale": "en",
            "greeting": "Witaj, {name}!"
        }
    "#};
    assert_eq!(output, expected);
}

#[test]
fn required_attributes_are_emitted_even_when_empty() {
    let input = r#"[{"term": "plain", "term_plural": "", "definition": "Plain"}]"#;

    let (output, result) = convert_poe(input, true, true, "");
    result.unwrap();

    let expected = indoc! {r#"
        {
            "@@locale": "en",
            "plain": "Plain",
            "@plain": {}
        }
    "#};
    assert_eq!(output, expected);
}

#[test]
fn prefix_filter_selects_and_renames() {
    let input = indoc! {r#"
        [
            {"term": "app:hello", "term_plural": "", "definition": "Hello"},
            {"term": "other:hello", "term_plural": "", "definition": "Bonjour"},
            {"term": "hello2", "term_plural": "", "definition": "Hi"}
        ]
    "#};

    let (output, result) = convert_poe(input, true, false, "app");
    result.unwrap();

    let expected = indoc! {r#"
        {
            "@@locale": "en",
            "hello": "Hello"
        }
    "#};
    assert_eq!(output, expected);
}

// https://github.com/leancodepl/poe2arb/issues/41
const EMPTY_PLURAL: &str = indoc! {r#"
    [
        {
            "term": "testPlural",
            "definition": {
                "one": "",
                "few": "",
                "many": "",
                "other": ""
            },
            "context": "",
            "term_plural": "plural",
            "reference": "",
            "comment": ""
        }
    ]
"#};

#[test]
fn empty_plural_fails_in_template_mode() {
    let (output, result) = convert_poe(EMPTY_PLURAL, true, false, "");

    let error = result.unwrap_err();
    assert_eq!(
        error.to_string(),
        r#"decoding term "testPlural" failed: missing "other" plural category"#
    );
    // Valid terms (here: none) are still written before the error report.
    assert_eq!(output, "{\n    \"@@locale\": \"en\"\n}\n");
}

#[test]
fn empty_plural_is_dropped_in_non_template_mode() {
    let (output, result) = convert_poe(EMPTY_PLURAL, false, false, "");

    result.unwrap();
    assert_eq!(output, "{\n    \"@@locale\": \"en\"\n}\n");
}

#[test]
fn failed_terms_do_not_abort_the_rest() {
    let input = indoc! {r#"
        [
            {"term": "good", "term_plural": "", "definition": "Good {name}"},
            {"term": "bad", "term_plural": "", "definition": "Bad {date,DateTime}"},
            {"term": "worse", "term_plural": "", "definition": "Worse {x,Widget}"}
        ]
    "#};

    let (output, result) = convert_poe(input, true, false, "");

    assert!(output.contains("\"good\": \"Good {name}\""));
    assert!(!output.contains("\"bad\""));

    let error = result.unwrap_err();
    let report = error.to_string();
    assert!(report.contains(r#"decoding term "bad" failed:"#));
    assert!(report.contains("- date: format is required for DateTime placeholders"));
    assert!(report.contains(r#"decoding term "worse" failed:"#));
}

#[test]
fn invalid_json_fails_with_decode_error() {
    let (_, result) = convert_poe("not json", true, false, "");
    let error = result.unwrap_err();
    assert!(error.to_string().starts_with("decoding json failed"));
}

#[test]
fn seed_round_trips_placeholder_definitions() {
    let template_arb = indoc! {r#"
        {
            "@@locale": "en",
            "birthday": "Born on {date} as {name}",
            "@birthday": {
                "placeholders": {
                    "date": {
                        "type": "DateTime",
                        "format": "yMd"
                    },
                    "name": {
                        "type": "String"
                    }
                }
            },
            "items": "{count, plural, =1 {{count} item} other {{count} items}}",
            "@items": {
                "placeholders": {
                    "count": {}
                }
            }
        }
    "#};

    let seeder = arb_to_poe::Converter::new("en".parse().unwrap(), "");
    let mut terms_json = Vec::new();
    let locale = seeder.convert(template_arb, &mut terms_json).unwrap();
    assert_eq!(locale.to_string(), "en");

    let (output, result) =
        convert_poe(std::str::from_utf8(&terms_json).unwrap(), true, false, "");
    result.unwrap();
    assert_eq!(output, template_arb);
}

proptest! {
    #[test]
    fn locale_forms_reparse_to_equal_locale(
        language in "[a-z]{2,3}",
        script in proptest::option::of(prop_oneof![
            Just("Cyrl"), Just("Hans"), Just("Hant"), Just("Latn")
        ]),
        region in proptest::option::of("[A-Z]{2}"),
    ) {
        let mut tag = language;
        if let Some(script) = script {
            tag.push('-');
            tag.push_str(script);
        }
        if let Some(region) = &region {
            tag.push('-');
            tag.push_str(region);
        }

        // A three-part form requires the middle part to be a script, which
        // the strategy guarantees. Two-part forms may resolve the tail as
        // either script or region; both must survive re-serialization.
        let locale: Locale = tag.parse().unwrap();
        let underscore: Locale = locale.to_string().parse().unwrap();
        let hyphen: Locale = locale.to_hyphen_lowercase().parse().unwrap();
        prop_assert_eq!(&locale, &underscore);
        prop_assert_eq!(&locale, &hyphen);
    }
}
