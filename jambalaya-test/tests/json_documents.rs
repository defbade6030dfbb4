use jambalaya_test::{AssertGenerator, AssertGeneratorConfig, generate};
use serde_json::json;

#[test]
fn graphql_response_renders_keyed_paths() {
    let response = json!({
        "data": {
            "order": {
                "id": 1,
                "items": [{ "sku": "X" }, null],
                "orderNumber": "A100"
            }
        },
        "errors": null
    });

    let expected = [
        r#"assertThat(response).isNotNull();"#,
        r#"  assertThat(response.get("data")).isNotNull();"#,
        r#"    assertThat(response.get("data").get("order")).isNotNull();"#,
        r#"      assertThat(response.get("data").get("order").get("id")).isEqualTo(1);"#,
        r#"      assertThat(response.get("data").get("order").get("items")).isNotNull();"#,
        r#"        assertThat(response.get("data").get("order").get("items").size()).isEqualTo(2);"#,
        r#"        assertThat(response.get("data").get("order").get("items").get(0)).isNotNull();"#,
        r#"          assertThat(response.get("data").get("order").get("items").get(0).get("sku")).isEqualTo("X");"#,
        r#"        assertThat(response.get("data").get("order").get("items").get(1)).isNull();"#,
        r#"      assertThat(response.get("data").get("order").get("orderNumber")).isEqualTo("A100");"#,
        r#"  assertThat(response.get("errors")).isNull();"#,
    ]
    .join("\n");

    let generator = AssertGenerator::new(AssertGeneratorConfig::default().with_indentation("  "));
    let text = generator
        .generate_text(&response, "response")
        .expect("json always generates")
        .expect("json is never ignored");
    assert_eq!(text, expected);
}

#[test]
fn json_scalars_keep_their_literal_form() {
    let doc = json!({ "flag": false, "ratio": 0.5, "quote": "say \"hi\"" });
    let text = generate(&doc, "doc").expect("generates").expect("not ignored").to_string();
    assert!(text.contains(r#"assertThat(doc.get("flag")).isEqualTo(false);"#));
    assert!(text.contains(r#"assertThat(doc.get("ratio")).isEqualTo(0.5);"#));
    assert!(text.contains(r#"assertThat(doc.get("quote")).isEqualTo("say \"hi\"");"#));
}

#[test]
fn ignored_keys_are_dropped() {
    let doc = json!({ "id": 1, "__typename": "Order" });
    let generator = AssertGenerator::new(AssertGeneratorConfig::default().ignore_method("__typename"));
    let line = generator.generate(&doc, "doc").expect("generates").expect("not ignored");
    assert_eq!(line.children().len(), 1);
    assert_eq!(line.children()[0].path(), r#"doc.get("id")"#);
}

#[test]
fn json_null_root_is_a_null_check() {
    let line = generate(&serde_json::Value::Null, "response")
        .expect("generates")
        .expect("null is asserted");
    assert_eq!(line.to_string(), "assertThat(response).isNull();");
}
