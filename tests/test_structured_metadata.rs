use std::time::Duration;

use recipe_extract::{
    Category, Difficulty, ProxyRoute, RecipeExtractor, SelectorTable, SiteProfile,
};

fn create_recipe_html(json_ld: &str) -> String {
    format!(
        r#"
        <!DOCTYPE html>
        <html>
        <head>
            <script type="application/ld+json">
                {}
            </script>
        </head>
        <body></body>
        </html>
        "#,
        json_ld
    )
}

async fn extractor_for(server: &mockito::ServerGuard) -> RecipeExtractor {
    RecipeExtractor::builder()
        .proxy_route("relay", format!("{}/proxy?url={{url}}", server.url()))
        .retry_attempts(1)
        .timeout(Duration::from_secs(5))
        .build()
}

#[tokio::test]
async fn test_metadata_travels_through_the_pipeline() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@context": "https://schema.org",
        "@type": "Recipe",
        "name": "Shakshuka",
        "image": ["https://example.com/shakshuka.jpg"],
        "prepTime": "PT10M",
        "cookTime": "PT25M",
        "recipeYield": "4 servings",
        "recipeCategory": "Breakfast",
        "keywords": "eggs, tomato, skillet",
        "recipeIngredient": ["6 eggs", "800g crushed tomatoes"],
        "recipeInstructions": [
            {"@type": "HowToStep", "text": "Simmer the sauce"},
            {"@type": "HowToStep", "text": "Crack in the eggs"}
        ]
    }
    "#;
    let _m = server
        .mock("GET", "/proxy")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;

    let draft = extractor_for(&server)
        .await
        .extract("https://breakfast.example.com/shakshuka")
        .await
        .unwrap();

    assert_eq!(draft.title, "Shakshuka");
    assert_eq!(draft.image.as_deref(), Some("https://example.com/shakshuka.jpg"));
    assert_eq!(draft.metadata.category, Category::Breakfast);
    assert_eq!(draft.metadata.prep_time_minutes, Some(10));
    assert_eq!(draft.metadata.cook_time_minutes, Some(25));
    assert_eq!(draft.metadata.servings, Some(4));
    assert_eq!(draft.metadata.difficulty, Difficulty::Medium);
    assert_eq!(draft.metadata.tags, vec!["eggs", "tomato", "skillet"]);
}

#[tokio::test]
async fn test_empty_and_absent_metadata_stays_unknown() {
    let mut server = mockito::Server::new_async().await;
    let json_ld = r#"
    {
        "@type": "Recipe",
        "name": "Plain Rice",
        "prepTime": "",
        "recipeYield": "",
        "recipeCategory": "Something Novel",
        "recipeIngredient": ["1 cup rice"],
        "recipeInstructions": ["Boil it"]
    }
    "#;
    let _m = server
        .mock("GET", "/proxy")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(create_recipe_html(json_ld))
        .create_async()
        .await;

    let draft = extractor_for(&server)
        .await
        .extract("https://rice.example.com/plain")
        .await
        .unwrap();

    assert_eq!(draft.metadata.prep_time_minutes, None);
    assert_eq!(draft.metadata.cook_time_minutes, None);
    assert_eq!(draft.metadata.servings, None);
    // Unmapped category text falls back to main, never an error
    assert_eq!(draft.metadata.category, Category::Main);
    assert!(draft.metadata.tags.is_empty());
    assert!(draft.image.is_none());
}

#[tokio::test]
async fn test_custom_site_profile_takes_precedence() {
    let mut server = mockito::Server::new_async().await;
    let _m = server
        .mock("GET", "/proxy")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_body(
            r#"
            <html><body>
                <h2 class="dish-name">Family Lasagna</h2>
                <ul class="dish-parts"><li>pasta</li><li>ragu</li></ul>
                <ol class="dish-steps"><li>Layer</li><li>Bake</li></ol>
            </body></html>
            "#,
        )
        .create_async()
        .await;

    let profile = SiteProfile {
        id: "family-blog".to_string(),
        hostnames: vec!["family.example.com".to_string()],
        selectors: SelectorTable {
            title: vec!["h2.dish-name".to_string()],
            image: vec!["img.dish-photo".to_string()],
            ingredients: vec!["ul.dish-parts li".to_string()],
            instructions: vec!["ol.dish-steps li".to_string()],
            prep_time: vec![],
            cook_time: vec![],
            servings: vec![],
            category: vec![],
        },
    };

    let extractor = RecipeExtractor::builder()
        .proxy_route("relay", format!("{}/proxy?url={{url}}", server.url()))
        .retry_attempts(1)
        .timeout(Duration::from_secs(5))
        .site(profile)
        .build();

    let draft = extractor
        .extract("https://family.example.com/dinner/lasagna")
        .await
        .unwrap();

    assert_eq!(draft.title, "Family Lasagna");
    assert_eq!(draft.ingredients.len(), 2);
    assert_eq!(draft.instructions[1].text, "Bake");
    // No category selector matched; the URL path names the meal
    assert_eq!(draft.metadata.category, Category::Dinner);
}
