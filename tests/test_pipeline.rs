use mockito::{Matcher, Server};
use recipe_import::config::{ProxyConfig, ProxyFormat};
use recipe_import::model::{
    CHECK_SOURCE_PAGE, INGREDIENTS_PLACEHOLDER, INSTRUCTIONS_PLACEHOLDER, NOT_PROVIDED,
};
use recipe_import::{ImportError, RecipePipeline, Translator};
use std::time::Duration;

const TARGET: &str = "https://cooking.example.com/recipes/soup";

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <title>Recipe Page</title>
            <script type="application/ld+json">
                {}
            </script>
        </head>
        <body>
            <h1>Recipe</h1>
        </body>
        </html>
        "#,
        json_ld
    )
}

fn raw_proxy(server: &Server) -> ProxyConfig {
    ProxyConfig::new(format!("{}/raw?url={{url}}", server.url()), ProxyFormat::Raw)
}

fn pipeline(proxies: Vec<ProxyConfig>) -> RecipePipeline {
    RecipePipeline::builder()
        .proxies(proxies)
        .timeout(Duration::from_secs(5))
        .without_translation()
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_structured_recipe_end_to_end() {
    let mut server = Server::new_async().await;
    let json_ld = r#"{"@type":"Recipe","name":"Soup","recipeIngredient":["1 onion","2 carrots"],"recipeInstructions":["Chop","Boil"]}"#;

    let mock = server
        .mock("GET", "/raw")
        .match_query(Matcher::UrlEncoded("url".into(), TARGET.into()))
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body(create_recipe_html(json_ld))
        .expect(1)
        .create_async()
        .await;

    let recipe = pipeline(vec![raw_proxy(&server)])
        .extract(TARGET)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Soup");
    assert_eq!(recipe.prep_time, NOT_PROVIDED);
    assert_eq!(recipe.ingredients, vec!["1 onion", "2 carrots"]);
    assert_eq!(recipe.instructions, vec!["Chop", "Boil"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_graph_recipe_with_sections_and_duration() {
    let mut server = Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@graph": [
            {"@type": "WebPage", "name": "Recipe Page"},
            {
                "@type": ["Recipe", "NewsArticle"],
                "name": "Chili &amp; Rice",
                "totalTime": "PT1H30M",
                "recipeYield": ["4", "4 servings"],
                "recipeIngredient": ["1 cup rice", "2 cans beans"],
                "recipeInstructions": [
                    {
                        "@type": "HowToSection",
                        "name": "Prep",
                        "itemListElement": [
                            {"@type": "HowToStep", "text": "Rinse the rice."},
                            {"@type": "HowToStep", "text": "Drain the beans."}
                        ]
                    },
                    {"@type": "HowToStep", "text": "Simmer everything."}
                ]
            }
        ]
    }
    "#;

    let _m = server
        .mock("GET", "/raw")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;

    let recipe = pipeline(vec![raw_proxy(&server)])
        .extract(TARGET)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Chili & Rice");
    assert_eq!(recipe.prep_time, "1 h 30 min");
    assert_eq!(recipe.servings.as_deref(), Some("4 servings"));
    assert_eq!(
        recipe.instructions,
        vec!["Rinse the rice.", "Drain the beans.", "Simmer everything."]
    );
}

#[tokio::test]
async fn test_falls_through_to_next_proxy() {
    let mut server = Server::new_async().await;
    let json_ld = r#"{"@type":"Recipe","name":"Soup","recipeIngredient":["1 onion"],"recipeInstructions":"Chop"}"#;

    let failing = server
        .mock("GET", "/raw")
        .match_query(Matcher::Any)
        .with_status(502)
        .expect(1)
        .create_async()
        .await;
    let envelope = serde_json::json!({ "contents": create_recipe_html(json_ld) }).to_string();
    let working = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(envelope)
        .expect(1)
        .create_async()
        .await;

    let proxies = vec![
        raw_proxy(&server),
        ProxyConfig::new(format!("{}/get?url={{url}}", server.url()), ProxyFormat::Json),
    ];
    let recipe = pipeline(proxies).extract(TARGET).await.unwrap();

    assert_eq!(recipe.name, "Soup");
    assert_eq!(recipe.instructions, vec!["Chop"]);
    failing.assert_async().await;
    working.assert_async().await;
}

#[tokio::test]
async fn test_unreachable_page_is_a_fetch_error() {
    let mut server = Server::new_async().await;
    let raw = server
        .mock("GET", "/raw")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(1)
        .create_async()
        .await;
    let empty = server
        .mock("GET", "/get")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"contents": ""}"#)
        .expect(1)
        .create_async()
        .await;

    let proxies = vec![
        raw_proxy(&server),
        ProxyConfig::new(format!("{}/get?url={{url}}", server.url()), ProxyFormat::Json),
    ];
    let err = pipeline(proxies).extract(TARGET).await.unwrap_err();

    assert!(matches!(err, ImportError::FetchError(_)));
    assert!(err.is_unreachable());
    raw.assert_async().await;
    empty.assert_async().await;
}

#[tokio::test]
async fn test_page_without_recipe_gets_placeholders() {
    let mut server = Server::new_async().await;
    let _m = server
        .mock("GET", "/raw")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html><head><title>About us</title></head><body><p>We like food.</p></body></html>")
        .create_async()
        .await;

    let recipe = pipeline(vec![raw_proxy(&server)])
        .extract(TARGET)
        .await
        .unwrap();

    assert_eq!(recipe.name, "About us");
    assert_eq!(recipe.prep_time, CHECK_SOURCE_PAGE);
    assert_eq!(recipe.ingredients, vec![INGREDIENTS_PLACEHOLDER]);
    assert_eq!(recipe.instructions, vec![INSTRUCTIONS_PLACEHOLDER]);
}

#[tokio::test]
async fn test_list_scanning_without_structured_data() {
    let mut server = Server::new_async().await;
    let html = r#"
        <html><body>
        <h1>Grandma's Pancakes</h1>
        <ul><li>200 g flour</li><li>2 eggs</li><li>300 ml milk</li></ul>
        <ol>
            <li>Whisk the flour and eggs together.</li>
            <li>Pour in the milk slowly.</li>
            <li>Fry thin pancakes on a hot pan.</li>
        </ol>
        </body></html>
    "#;
    let _m = server
        .mock("GET", "/raw")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(html)
        .create_async()
        .await;

    let recipe = pipeline(vec![raw_proxy(&server)])
        .extract(TARGET)
        .await
        .unwrap();

    assert_eq!(recipe.name, "Grandma's Pancakes");
    assert_eq!(recipe.prep_time, NOT_PROVIDED);
    assert_eq!(recipe.ingredients, vec!["200 g flour", "2 eggs", "300 ml milk"]);
    assert_eq!(
        recipe.instructions,
        vec![
            "Whisk the flour and eggs together.",
            "Pour in the milk slowly.",
            "Fry thin pancakes on a hot pan."
        ]
    );
}

#[tokio::test]
async fn test_result_is_translated() {
    let mut server = Server::new_async().await;
    let json_ld = r#"{"@type":"Recipe","name":"Soup","recipeIngredient":["1 onion"],"recipeInstructions":["Chop"]}"#;
    let _page = server
        .mock("GET", "/raw")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;

    let mut translations = Vec::new();
    for (source, target) in [("Soup", "Zupa"), ("1 onion", "1 cebula"), ("Chop", "Pokrój")] {
        translations.push(
            server
                .mock("GET", "/translate")
                .match_query(Matcher::UrlEncoded("q".into(), source.into()))
                .with_status(200)
                .with_body(
                    serde_json::json!({
                        "responseData": {"translatedText": target},
                        "responseStatus": 200
                    })
                    .to_string(),
                )
                .expect(1)
                .create_async()
                .await,
        );
    }

    let translator = Translator::new(
        format!("{}/translate", server.url()),
        "en",
        "pl",
        "ąćęłńóśźż",
        Duration::ZERO,
        Duration::from_secs(5),
    )
    .unwrap();
    let pipeline = RecipePipeline::builder()
        .proxies(vec![raw_proxy(&server)])
        .translator(translator)
        .build()
        .unwrap();

    let recipe = pipeline.extract(TARGET).await.unwrap();

    assert_eq!(recipe.name, "Zupa");
    assert_eq!(recipe.ingredients, vec!["1 cebula"]);
    assert_eq!(recipe.instructions, vec!["Pokrój"]);
    assert_eq!(recipe.prep_time, NOT_PROVIDED);
    for mock in translations {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn test_invalid_url() {
    let err = pipeline(vec![ProxyConfig::new(
        "http://127.0.0.1:9/raw?url={url}",
        ProxyFormat::Raw,
    )])
    .extract("/recipes/soup")
    .await
    .unwrap_err();

    assert!(matches!(err, ImportError::InvalidUrl(_)));
}
