use super::*;
use super::Token::{
    HtmlEntityEnd as EntityEnd, HtmlEntityNumeric as Numeric, HtmlEntityStart as EntityStart,
    TemplateClose as Close, TemplateOpen as Open, TemplateParamEquals as Equals,
    TemplateParamSeparator as Sep,
};


/// Tokenizes `input` with the default configuration, checking that the tokens
/// cover the whole input.
#[track_caller]
fn run_test(input: &str) -> Vec<Token> {
    run_test_with_config(&Configuration::default(), input)
}

#[track_caller]
fn run_test_with_config(config: &Configuration, input: &str) -> Vec<Token> {
    let _ = env_logger::try_init();
    let tokens = Tokenizer::new(config, input).tokenize().unwrap();
    assert_eq!(source_of(&tokens), input, "{}", inspect(&tokens));
    tokens
}

/// Reassembles the markup a token list was read from.
fn source_of(tokens: &[Token]) -> String {
    tokens.iter().map(ToString::to_string).collect()
}

/// Asserts that `input` tokenizes to a single run of text.
#[track_caller]
fn assert_text(input: &str) {
    assert_eq!(run_test(input), [text(input)]);
}

fn text(text: &str) -> Token {
    Token::text(text)
}

#[test]
fn plain_text() {
    assert!(run_test("").is_empty());
    assert_text("hello world");
    assert_text("a|b=c");
    assert_text("}} {");
}

#[test]
fn template() {
    assert_eq!(run_test("{{a}}"), [Open, text("a"), Close]);
    assert_eq!(run_test("x{{a}}y"), [text("x"), Open, text("a"), Close, text("y")]);
    assert_eq!(run_test("{{}}"), [Open, Close]);
}

#[test]
fn template_params() {
    assert_eq!(
        run_test("{{a|b=c|d}}"),
        [
            Open,
            text("a"),
            Sep,
            text("b"),
            Equals,
            text("c"),
            Sep,
            text("d"),
            Close
        ]
    );
    assert_eq!(run_test("{{|}}"), [Open, Sep, Close]);
}

#[test]
fn equals_outside_key() {
    assert_eq!(run_test("{{a=b}}"), [Open, text("a=b"), Close]);
    assert_eq!(
        run_test("{{a|b=c=d}}"),
        [Open, text("a"), Sep, text("b"), Equals, text("c=d"), Close]
    );
    assert_eq!(
        run_test("{{a|b=c|=}}"),
        [
            Open,
            text("a"),
            Sep,
            text("b"),
            Equals,
            text("c"),
            Sep,
            Equals,
            Close
        ]
    );
}

#[test]
fn nested_template() {
    assert_eq!(
        run_test("{{a|{{b}}}}"),
        [Open, text("a"), Sep, Open, text("b"), Close, Close]
    );
    assert_eq!(
        run_test("{{a|k={{b|c}}|d}}"),
        [
            Open,
            text("a"),
            Sep,
            text("k"),
            Equals,
            Open,
            text("b"),
            Sep,
            text("c"),
            Close,
            Sep,
            text("d"),
            Close
        ]
    );
}

#[test]
fn nested_template_in_name() {
    assert_eq!(
        run_test("{{{{a}}|b}}"),
        [Open, Open, text("a"), Close, Sep, text("b"), Close]
    );
}

#[test]
fn triple_braces() {
    assert_eq!(
        run_test("{{{a}}}"),
        [Open, text("{a"), Close, text("}")]
    );
}

#[test]
fn unterminated_template() {
    assert_text("{{a");
    assert_text("{{a|b=c");
    assert_text("{{a}");
    assert_text("{{");
    assert_text("{{{{a");
}

#[test]
fn unterminated_outer_template() {
    assert_eq!(
        run_test("{{a|{{b}}"),
        [text("{{a|"), Open, text("b"), Close]
    );
}

#[test]
fn template_name_newline() {
    assert_text("{{a\n\nb}}");
    assert_text("{{a\nb}}");
    assert_eq!(
        run_test("{{a\n|b}}"),
        [Open, text("a\n"), Sep, text("b"), Close]
    );
    assert_eq!(run_test("{{a\n}}"), [Open, text("a\n"), Close]);
    assert_eq!(run_test("{{\n\nb}}"), [Open, text("\n\nb"), Close]);
    assert_eq!(run_test("{{a\n=b}}"), [Open, text("a\n=b"), Close]);
}

#[test]
fn newline_allowed_outside_name() {
    assert_eq!(
        run_test("{{a|b\n\nc}}"),
        [Open, text("a"), Sep, text("b\n\nc"), Close]
    );
}

#[test]
fn named_entity() {
    assert_eq!(run_test("&amp;"), [EntityStart, text("amp"), EntityEnd]);
    assert_eq!(
        run_test("a &lt;b&gt;"),
        [
            text("a "),
            EntityStart,
            text("lt"),
            EntityEnd,
            text("b"),
            EntityStart,
            text("gt"),
            EntityEnd
        ]
    );
    assert_text("&notarealentity;");
    assert_text("&AMP;");
}

#[test]
fn html5_entities() {
    let config = Configuration {
        entities: EntitySet::Html5,
        ..Default::default()
    };
    assert_text("&apos;");
    assert_eq!(
        run_test_with_config(&config, "&apos;"),
        [EntityStart, text("apos"), EntityEnd]
    );
    assert_eq!(
        run_test_with_config(&config, "&notarealentity;"),
        [text("&notarealentity;")]
    );
}

#[test]
fn numeric_entity() {
    assert_eq!(
        run_test("&#65;"),
        [EntityStart, Numeric, text("65"), EntityEnd]
    );
    assert_eq!(
        run_test("&#x41;"),
        [
            EntityStart,
            Numeric,
            Token::HtmlEntityHex { marker: 'x' },
            text("41"),
            EntityEnd
        ]
    );
    assert_eq!(
        run_test("&#XfF;"),
        [
            EntityStart,
            Numeric,
            Token::HtmlEntityHex { marker: 'X' },
            text("fF"),
            EntityEnd
        ]
    );
}

#[test]
fn numeric_entity_bounds() {
    assert_text("&#0;");
    assert_text("&#1114112;");
    assert_text("&#x0;");
    assert_text("&#x110000;");
    assert_text("&#99999999999999999999;");
    assert_eq!(
        run_test("&#1;"),
        [EntityStart, Numeric, text("1"), EntityEnd]
    );
    assert_eq!(
        run_test("&#1114111;"),
        [EntityStart, Numeric, text("1114111"), EntityEnd]
    );
    assert_eq!(
        run_test("&#x10FFFF;"),
        [
            EntityStart,
            Numeric,
            Token::HtmlEntityHex { marker: 'x' },
            text("10FFFF"),
            EntityEnd
        ]
    );
}

#[test]
fn malformed_entity() {
    assert_text("&");
    assert_text("&;");
    assert_text("&#;");
    assert_text("&#x;");
    assert_text("&#");
    assert_text("&#x");
    assert_text("&amp");
    assert_text("& amp;");
    assert_text("&#12a;");
    assert_text("&#xg;");
    assert_text("&am-p;");
    assert_eq!(
        run_test("&&amp;"),
        [text("&"), EntityStart, text("amp"), EntityEnd]
    );
}

#[test]
fn entity_in_template() {
    assert_eq!(
        run_test("{{a|&lt;}}"),
        [Open, text("a"), Sep, EntityStart, text("lt"), EntityEnd, Close]
    );
    assert_eq!(
        run_test("{{a|&x}}"),
        [Open, text("a"), Sep, text("&x"), Close]
    );
    assert_eq!(
        run_test("{{a&amp;b}}"),
        [Open, text("a"), EntityStart, text("amp"), EntityEnd, text("b"), Close]
    );
}

#[test]
fn entity_does_not_swallow_template() {
    assert_eq!(
        run_test("&{{a}};"),
        [text("&"), Open, text("a"), Close, text(";")]
    );
}

#[test]
fn pathological() {
    assert_text(&"{".repeat(30));
    assert_text(&"{{a|".repeat(15));
    assert_text(&"&".repeat(30));
    assert_text(&"&#".repeat(30));
    assert_eq!(
        run_test(&format!("{}a{}", "{".repeat(30), "}".repeat(30))),
        run_test_with_config(
            &Configuration {
                memoize_bad_routes: false,
                ..Default::default()
            },
            &format!("{}a{}", "{".repeat(30), "}".repeat(30))
        )
    );
}

#[test]
fn memoization_does_not_change_output() {
    let no_memo = Configuration {
        memoize_bad_routes: false,
        ..Default::default()
    };
    for input in [
        "{{{{{{{{{{{{{{{{{{{{",
        "{{a|{{b|{{c",
        "{{{{a}}|{{b\n\nc}}}}",
        "{{a\n\nb|{{c}}}}{{d}}",
    ] {
        assert_eq!(run_test(input), run_test_with_config(&no_memo, input));
    }
}

#[test]
fn depth_limit() {
    let err = Tokenizer::new(&Configuration::default(), &"{{".repeat(50))
        .tokenize()
        .unwrap_err();
    assert_eq!(
        err,
        Error::DepthLimit {
            limit: 40,
            position: LineCol {
                line: 1,
                column: 81,
                offset: 80
            }
        }
    );
    assert_eq!(err.to_string(), "nesting depth limit of 40 exceeded at 1:81");
}

#[test]
fn depth_limit_ignores_entities() {
    let config = Configuration {
        max_depth: 2,
        ..Default::default()
    };
    assert_eq!(
        run_test_with_config(&config, "{{a}}"),
        [Open, text("a"), Close]
    );
    assert_eq!(
        run_test_with_config(&config, "&amp;"),
        [EntityStart, text("amp"), EntityEnd]
    );
    assert_eq!(
        run_test_with_config(&config, "{{a|&amp;}}"),
        [Open, text("a"), Sep, EntityStart, text("amp"), EntityEnd, Close]
    );
    assert_eq!(
        run_test_with_config(&config, "{{AT&T}}"),
        [Open, text("AT&T"), Close]
    );
    assert!(matches!(
        Tokenizer::new(&config, "x\n{{{{a}}}}").tokenize(),
        Err(Error::DepthLimit {
            limit: 2,
            position: LineCol { line: 2, column: 5, .. },
        })
    ));
}

#[test]
fn depth_limit_is_capped() {
    let config = Configuration {
        max_depth: usize::MAX,
        ..Default::default()
    };
    assert_eq!(config.depth_limit(), Configuration::MAX_DEPTH_LIMIT);

    let input = "{{a|".repeat(100_000);
    let result = std::thread::Builder::new()
        .stack_size(2 << 20)
        .spawn(move || Tokenizer::new(&config, &input).tokenize())
        .unwrap()
        .join()
        .unwrap();
    assert_eq!(
        result,
        Err(Error::DepthLimit {
            limit: Configuration::MAX_DEPTH_LIMIT,
            position: LineCol {
                line: 1,
                column: 1023,
                offset: 1022
            }
        })
    );
}

#[test]
fn memoization_at_depth_limit() {
    for input in [
        "{{{{{{a",
        "{{{{a}}}}",
        "{{a|{{b|{{c}}}}",
        "{{a|{{b}}|{{c|{{d",
        "{{{{{{a}}}}|{{{{b",
        "{{a\n\nb|{{c|{{d}}}}}}",
        "{{{{a}}|{{b|{{c}}}}}}",
    ] {
        for max_depth in 2..=4 {
            let memo = Configuration {
                max_depth,
                ..Default::default()
            };
            let no_memo = Configuration {
                memoize_bad_routes: false,
                ..memo.clone()
            };
            assert_eq!(
                Tokenizer::new(&memo, input).tokenize(),
                Tokenizer::new(&no_memo, input).tokenize(),
                "{input:?} at depth {max_depth}"
            );
        }
    }
}

#[test]
fn code_points() {
    assert_eq!(
        run_test("é{{ü|ß=☃}}"),
        [
            text("é"),
            Open,
            text("ü"),
            Sep,
            text("ß"),
            Equals,
            text("☃"),
            Close
        ]
    );
}
