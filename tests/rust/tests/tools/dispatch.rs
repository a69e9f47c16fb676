//! Argument mapping, paging defaults, and compaction per tool

use druginfo_server::tools::definitions::*;
use druginfo_server::ToolOutput;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tests::{args, fixtures, Harness};
use wiremock::matchers::{header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, ResponseTemplate};

const TOKEN: &str = "tok";

fn json_output(output: ToolOutput) -> Value {
    match output {
        ToolOutput::Json(value) => value,
        ToolOutput::Text(text) => panic!("expected JSON output, got text: {}", text),
    }
}

#[tokio::test]
async fn test_list_main_ingredient_defaults_and_compaction() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/main-ingredient"))
        .and(header("authorization", "Bearer tok"))
        .and(query_param("PageSize", "5"))
        .and(query_param("Page", "1"))
        .and(query_param("ingredientNameKor", "실데나필"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ingredient_page()))
        .expect(1)
        .mount(&h.server)
        .await;

    let output = h
        .tools
        .call(LIST_MAIN_INGREDIENT, &args(json!({"ingredientNameKor": "실데나필"})))
        .await
        .unwrap();

    let value = json_output(output);
    assert_eq!(value["items"][0]["code"], json!("553304ATD"));
    assert_eq!(value["hasMore"], json!(true));
}

#[tokio::test]
async fn test_legacy_aliases_resolve_paging_and_pass_through() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product"))
        .and(query_param("PageSize", "30"))
        .and(query_param("Page", "4"))
        .and(query_param("size", "30"))
        .and(query_param("page", "4"))
        .and(query_param("q", "타이레놀"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::product_page()))
        .expect(1)
        .mount(&h.server)
        .await;

    h.tools
        .call(LIST_PRODUCT, &args(json!({"q": "타이레놀", "size": 30, "page": 4})))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_boolean_filters_are_sent() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product"))
        .and(query_param("confirm", "true"))
        .and(query_param("minCount", "3"))
        .and(query_param_is_missing("crop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&h.server)
        .await;

    let value = json_output(
        h.tools
            .call(LIST_PRODUCT, &args(json!({"confirm": true, "minCount": 3})))
            .await
            .unwrap(),
    );
    assert_eq!(value, json!({"items": [], "total": 0}));
}

#[tokio::test]
async fn test_catalog_tools_default_to_ten_per_page() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    for route in [
        "/v1/druginfo/main-ingredient/drug-effect",
        "/v1/druginfo/main-ingredient/drug-kind",
        "/v1/druginfo/main-ingredient/guide-a4",
        "/v1/druginfo/main-ingredient/guide-a5",
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .and(query_param("pageSize", "10"))
            .and(query_param("page", "1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"data": {"rows": [{"route": route}], "count": 1}})),
            )
            .expect(1)
            .mount(&h.server)
            .await;
    }

    for (tool, route) in [
        (LIST_DRUG_EFFECT, "/v1/druginfo/main-ingredient/drug-effect"),
        (LIST_DRUG_KIND, "/v1/druginfo/main-ingredient/drug-kind"),
        (LIST_GUIDE_A4, "/v1/druginfo/main-ingredient/guide-a4"),
        (LIST_GUIDE_A5, "/v1/druginfo/main-ingredient/guide-a5"),
    ] {
        let value = json_output(h.tools.call(tool, &args(json!({}))).await.unwrap());
        assert_eq!(value["items"], json!([{"route": route}]), "{}", tool);
    }
}

#[tokio::test]
async fn test_picto_and_edicode_defaults() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/main-ingredient/picto"))
        .and(query_param("PageSize", "5"))
        .and(query_param("Page", "1"))
        .and(query_param("Title", "복용"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"title": "복용"}]})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product/edicode"))
        .and(query_param("EdiCode", "640905240"))
        .and(query_param("PageSize", "5"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"items": [{"productCode": "P1", "ediCode": "640905240"}]})),
        )
        .expect(1)
        .mount(&h.server)
        .await;

    h.tools.call(LIST_PICTO, &args(json!({"Title": "복용"}))).await.unwrap();
    let value = json_output(
        h.tools
            .call(LIST_PRODUCT_EDICODE, &args(json!({"EdiCode": "640905240"})))
            .await
            .unwrap(),
    );
    assert_eq!(value["items"], json!([{"code": "P1", "ediCode": "640905240"}]));
}

#[tokio::test]
async fn test_detail_tools() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    fixtures::mount_authorized_get(
        &h.server,
        "/v1/druginfo/product/E201301617ATB8J",
        TOKEN,
        fixtures::product_detail(),
    )
    .await;
    fixtures::mount_authorized_get(
        &h.server,
        "/v1/druginfo/main-ingredient/drug-effect/42",
        TOKEN,
        json!({"data": {"effectId": 42, "raw": true}}),
    )
    .await;
    fixtures::mount_authorized_get(
        &h.server,
        "/v1/druginfo/main-ingredient/picto/PIC01",
        TOKEN,
        json!({"code": "PIC01", "svg": "<svg/>"}),
    )
    .await;

    let product = json_output(
        h.tools
            .call(GET_PRODUCT, &args(json!({"code": "E201301617ATB8J"})))
            .await
            .unwrap(),
    );
    assert_eq!(product["code"], json!("E201301617ATB8J"));
    assert_eq!(product["korange"], json!({"공공대조약": "True"}));

    let effect = json_output(
        h.tools
            .call(GET_DRUG_EFFECT, &args(json!({"effectId": "42"})))
            .await
            .unwrap(),
    );
    assert_eq!(effect, json!({"data": {"effectId": 42, "raw": true}}));

    let picto = json_output(h.tools.call(GET_PICTO, &args(json!({"code": "PIC01"}))).await.unwrap());
    assert_eq!(picto, json!({"code": "PIC01", "svg": "<svg/>"}));
}

#[tokio::test]
async fn test_drug_effect_by_integer_id() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/main-ingredient/drug-effect/12"))
        .and(header("authorization", "Bearer tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"effectId": 12}})))
        .expect(1)
        .mount(&h.server)
        .await;

    let effect = json_output(
        h.tools
            .call(GET_DRUG_EFFECT, &args(json!({"effectId": 12})))
            .await
            .unwrap(),
    );
    assert_eq!(effect, json!({"data": {"effectId": 12}}));
}

#[tokio::test]
async fn test_same_ingredient_page_size_defaults() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product/edicode/same-ingredient"))
        .and(query_param("MasterIngredientCode", "553304ATD"))
        .and(query_param_is_missing("PageSize"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"productCode": "P1"}]})))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product/edicode/same-ingredient"))
        .and(query_param("MasterIngredientCode", "553304ATD"))
        .and(query_param("PageSize", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": [{"productCode": "P2"}]})))
        .expect(1)
        .mount(&h.server)
        .await;

    let listed = json_output(
        h.tools
            .call(LIST_SAME_INGREDIENT, &args(json!({"MasterIngredientCode": "553304ATD"})))
            .await
            .unwrap(),
    );
    assert_eq!(listed["items"], json!([{"code": "P1"}]));

    let found = json_output(
        h.tools
            .call(FIND_SAME_INGREDIENT, &args(json!({"MasterIngredientCode": "553304ATD"})))
            .await
            .unwrap(),
    );
    assert_eq!(found["items"], json!([{"code": "P2"}]));
}

#[tokio::test]
async fn test_search_druginfo_routes_by_type() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/product"))
        .and(query_param("pillName", "타이레놀"))
        .and(query_param("PageSize", "20"))
        .and(query_param("Page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::product_page()))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/druginfo/main-ingredient"))
        .and(query_param("ingredientNameKor", "실데나필"))
        .and(query_param("PageSize", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::ingredient_page()))
        .expect(1)
        .mount(&h.server)
        .await;

    let products = json_output(
        h.tools
            .call(SEARCH, &args(json!({"type": "product", "query": "타이레놀"})))
            .await
            .unwrap(),
    );
    assert_eq!(products["items"][0]["code"], json!("O200400311ATB3K"));

    let ingredients = json_output(
        h.tools
            .call(SEARCH, &args(json!({"type": "ingredient", "query": "실데나필", "PageSize": 3})))
            .await
            .unwrap(),
    );
    assert_eq!(ingredients["items"][0]["name"], json!("실데나필시트르산염"));
}

#[tokio::test]
async fn test_get_druginfo_detail_ingredient() {
    let h = Harness::with_mirrored_token(TOKEN).await;
    fixtures::mount_authorized_get(
        &h.server,
        "/v1/druginfo/main-ingredient/553304ATD",
        TOKEN,
        json!({"data": {"ingredientNameKor": "실데나필", "IngredientCode": "553304ATD"}}),
    )
    .await;

    let value = json_output(
        h.tools
            .call(GET_DETAIL, &args(json!({"type": "ingredient", "code": "553304ATD"})))
            .await
            .unwrap(),
    );
    assert_eq!(value, json!({"name": "실데나필", "code": "553304ATD"}));
}

#[tokio::test]
async fn test_login_tool_returns_token_preview() {
    let h = Harness::with_credentials().await;
    fixtures::mount_login(&h.server, "abcdefghijklmnopqrstuvwxyz", 1).await;

    let output = h.tools.call(LOGIN, &args(json!({}))).await.unwrap();
    assert_eq!(
        output,
        ToolOutput::Text("Login succeeded. Token: abcdefghijklmnopqrst...".to_string())
    );
}
