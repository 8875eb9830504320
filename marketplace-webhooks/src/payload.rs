//! Webhook payload types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Orchestrator webhook endpoints exposed by the marketplace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// `POST /webhooks/orchestrator/brand-created`
    BrandCreated,
    /// `POST /webhooks/orchestrator/book-generated`
    BookGenerated,
    /// `POST /webhooks/orchestrator/seo-generated`
    SeoGenerated,
    /// `GET /webhooks/orchestrator/health`
    Health,
}

impl Endpoint {
    /// Path segment below the orchestrator prefix
    pub fn name(&self) -> &'static str {
        match self {
            Self::BrandCreated => "brand-created",
            Self::BookGenerated => "book-generated",
            Self::SeoGenerated => "seo-generated",
            Self::Health => "health",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional field that keeps an explicit `null` apart from a missing key.
///
/// `None` is absent and not serialized, `Some(None)` is sent as `null`.
pub type Nullable<T> = Option<Option<T>>;

fn present<'de, T, D>(deserializer: D) -> std::result::Result<Nullable<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A newly created brand.
///
/// Serialized as-is for `brand-created`. The presentation keys keep the
/// upper-case names the marketplace templates use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandEvent {
    /// Brand ID; the marketplace derives one from the name when absent
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Nullable<String>,

    /// Brand name
    pub name: String,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tagline: Nullable<String>,

    /// Primary color, e.g. `#6366F1`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub theme_color: Nullable<String>,

    /// Accent color, e.g. `#EC4899`
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub accent_color: Nullable<String>,

    #[serde(
        rename = "HERO_HEADLINE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_headline: Nullable<String>,

    #[serde(
        rename = "HERO_SUBHEADLINE",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub hero_subheadline: Nullable<String>,

    #[serde(
        rename = "BUTTON_TEXT",
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub button_text: Nullable<String>,

    /// Storefront feature flags (`newsletter`, `reviews`, ...)
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub features: Nullable<BTreeMap<String, bool>>,

    /// Keys this type does not model, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BrandEvent {
    /// Create a brand event with only the required name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            tagline: None,
            theme_color: None,
            accent_color: None,
            hero_headline: None,
            hero_subheadline: None,
            button_text: None,
            features: None,
            extra: Map::new(),
        }
    }

    /// Set an explicit brand ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Some(id.into()));
        self
    }

    pub fn with_tagline(mut self, tagline: impl Into<String>) -> Self {
        self.tagline = Some(Some(tagline.into()));
        self
    }

    /// Set theme and accent colors
    pub fn with_colors(mut self, theme: impl Into<String>, accent: impl Into<String>) -> Self {
        self.theme_color = Some(Some(theme.into()));
        self.accent_color = Some(Some(accent.into()));
        self
    }

    /// Set the hero section headline and subheadline
    pub fn with_hero(
        mut self,
        headline: impl Into<String>,
        subheadline: impl Into<String>,
    ) -> Self {
        self.hero_headline = Some(Some(headline.into()));
        self.hero_subheadline = Some(Some(subheadline.into()));
        self
    }

    pub fn with_button_text(mut self, text: impl Into<String>) -> Self {
        self.button_text = Some(Some(text.into()));
        self
    }

    /// Enable or disable a storefront feature
    pub fn with_feature(mut self, feature: impl Into<String>, enabled: bool) -> Self {
        self.features
            .get_or_insert(None)
            .get_or_insert_with(BTreeMap::new)
            .insert(feature.into(), enabled);
        self
    }
}

/// One entry of a book's table of contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub title: String,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Chapter {
    pub fn new(number: u32, title: impl Into<String>) -> Self {
        Self {
            number,
            title: title.into(),
            extra: Map::new(),
        }
    }
}

/// A generated book, sent inside the `book-generated` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookEvent {
    /// Book ID; the marketplace derives one from the title when absent
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub id: Nullable<String>,

    pub title: String,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub author: Nullable<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub price: Nullable<Number>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub sale_price: Nullable<Number>,

    /// Short description
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub description: Nullable<String>,

    /// Full description
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub long_description: Nullable<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub categories: Nullable<Vec<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub tags: Nullable<Vec<String>>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub word_count: Nullable<u64>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub chapters: Nullable<Vec<Chapter>>,

    /// Selling points shown on the product page
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub features: Nullable<Vec<String>>,

    /// Keys this type does not model, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BookEvent {
    /// Create a book event with only the required title
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            author: None,
            price: None,
            sale_price: None,
            description: None,
            long_description: None,
            categories: None,
            tags: None,
            word_count: None,
            chapters: None,
            features: None,
            extra: Map::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(Some(id.into()));
        self
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(Some(author.into()));
        self
    }

    /// Set the list price. A non-finite price is sent as `null`.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(Number::from_f64(price));
        self
    }

    pub fn with_sale_price(mut self, price: f64) -> Self {
        self.sale_price = Some(Number::from_f64(price));
        self
    }

    /// Set the short and long descriptions
    pub fn with_descriptions(
        mut self,
        description: impl Into<String>,
        long_description: impl Into<String>,
    ) -> Self {
        self.description = Some(Some(description.into()));
        self.long_description = Some(Some(long_description.into()));
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = Some(Some(categories.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = Some(Some(tags.into_iter().map(Into::into).collect()));
        self
    }

    pub fn with_word_count(mut self, words: u64) -> Self {
        self.word_count = Some(Some(words));
        self
    }

    /// Append a chapter to the table of contents
    pub fn with_chapter(mut self, number: u32, title: impl Into<String>) -> Self {
        self.chapters
            .get_or_insert(None)
            .get_or_insert_with(Vec::new)
            .push(Chapter::new(number, title));
        self
    }

    pub fn with_features<I, S>(mut self, features: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.features = Some(Some(features.into_iter().map(Into::into).collect()));
        self
    }
}

/// A generated SEO blog post, sent inside the `seo-generated` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoEvent {
    pub title: String,

    /// Post body as HTML
    pub content: String,

    /// URL slug; the marketplace derives one from the title when absent
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub slug: Nullable<String>,

    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub meta_description: Nullable<String>,

    /// Comma separated SEO keywords
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub keywords: Nullable<String>,

    /// Render the "browse our books" call-to-action under the post
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub related_book: Nullable<bool>,

    /// Keys this type does not model, passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SeoEvent {
    /// Create a post with the required title and HTML content
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            slug: None,
            meta_description: None,
            keywords: None,
            related_book: None,
            extra: Map::new(),
        }
    }

    pub fn with_slug(mut self, slug: impl Into<String>) -> Self {
        self.slug = Some(Some(slug.into()));
        self
    }

    pub fn with_meta_description(mut self, description: impl Into<String>) -> Self {
        self.meta_description = Some(Some(description.into()));
        self
    }

    pub fn with_keywords(mut self, keywords: impl Into<String>) -> Self {
        self.keywords = Some(Some(keywords.into()));
        self
    }

    pub fn with_related_book(mut self, related: bool) -> Self {
        self.related_book = Some(Some(related));
        self
    }
}

/// Body of a `book-generated` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookNotification<'a> {
    pub brand_id: &'a str,
    pub book: &'a BookEvent,

    /// Base64 encoded cover image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_file: Option<String>,

    /// Base64 encoded PDF
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_file: Option<String>,
}

/// Body of a `seo-generated` request
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeoNotification<'a> {
    pub brand_id: &'a str,
    pub post: &'a SeoEvent,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_endpoint_names() {
        assert_eq!(Endpoint::BrandCreated.name(), "brand-created");
        assert_eq!(Endpoint::BookGenerated.to_string(), "book-generated");
        assert_eq!(Endpoint::SeoGenerated.name(), "seo-generated");
        assert_eq!(Endpoint::Health.name(), "health");
    }

    #[test]
    fn test_brand_serialization_uses_marketplace_keys() {
        let brand = BrandEvent::new("Python Mastery Press")
            .with_colors("#3776AB", "#FFD43B")
            .with_hero("Learn Python the Smart Way", "AI-powered books")
            .with_button_text("Start Learning")
            .with_feature("newsletter", true);

        let value = serde_json::to_value(&brand).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "Python Mastery Press",
                "themeColor": "#3776AB",
                "accentColor": "#FFD43B",
                "HERO_HEADLINE": "Learn Python the Smart Way",
                "HERO_SUBHEADLINE": "AI-powered books",
                "BUTTON_TEXT": "Start Learning",
                "features": {"newsletter": true}
            })
        );
    }

    #[test]
    fn test_minimal_brand_has_no_defaults() {
        let value = serde_json::to_value(BrandEvent::new("Acme")).unwrap();
        assert_eq!(value, json!({"name": "Acme"}));
    }

    #[test]
    fn test_brand_keeps_unknown_keys() {
        let input = json!({
            "name": "Acme",
            "tagline": "Books for everyone",
            "PRIMARY_COLOR": "#2563EB",
            "launch": {"week": 3}
        });

        let brand: BrandEvent = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(brand.tagline, Some(Some("Books for everyone".to_string())));
        assert_eq!(brand.extra.len(), 2);
        assert_eq!(serde_json::to_value(&brand).unwrap(), input);
    }

    #[test]
    fn test_book_chapters_and_prices() {
        let book = BookEvent::new("Python for Data Science")
            .with_price(14.99)
            .with_sale_price(9.99)
            .with_word_count(52000)
            .with_chapter(1, "Python Fundamentals")
            .with_chapter(2, "NumPy Arrays")
            .with_tags(["python", "pandas"]);

        let value = serde_json::to_value(&book).unwrap();
        assert_eq!(value["salePrice"], json!(9.99));
        assert_eq!(value["wordCount"], json!(52000));
        assert_eq!(
            value["chapters"],
            json!([
                {"number": 1, "title": "Python Fundamentals"},
                {"number": 2, "title": "NumPy Arrays"}
            ])
        );
        assert!(value.get("author").is_none());
    }

    #[test]
    fn test_book_notification_omits_missing_files() {
        let book = BookEvent::new("Intro");
        let body = BookNotification {
            brand_id: "acme",
            book: &book,
            cover_file: Some("AAEC".to_string()),
            pdf_file: None,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({"brandId": "acme", "book": {"title": "Intro"}, "coverFile": "AAEC"})
        );
    }

    #[test]
    fn test_seo_notification() {
        let post = SeoEvent::new("What is Quantum Computing?", "<p>Qubits</p>")
            .with_meta_description("Learn the basics")
            .with_related_book(true);
        let body = SeoNotification {
            brand_id: "quantum",
            post: &post,
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["brandId"], "quantum");
        assert_eq!(value["post"]["metaDescription"], "Learn the basics");
        assert_eq!(value["post"]["relatedBook"], true);
        assert!(value["post"].get("slug").is_none());
    }

    #[test]
    fn test_seo_requires_content() {
        let result = serde_json::from_value::<SeoEvent>(json!({"title": "No body"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_nulls_are_kept() {
        let input = json!({"name": "Acme", "tagline": null, "features": null});

        let brand: BrandEvent = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(brand.tagline, Some(None));
        assert_eq!(brand.theme_color, None);
        assert_eq!(serde_json::to_value(&brand).unwrap(), input);

        let brand = brand.with_feature("reviews", true);
        assert_eq!(
            serde_json::to_value(&brand).unwrap()["features"],
            json!({"reviews": true})
        );
    }

    #[test]
    fn test_book_prices_keep_their_number_type() {
        let input = json!({
            "title": "X",
            "price": 15,
            "salePrice": 9.99,
            "author": null,
            "chapters": [{"number": 1, "title": "Start", "pages": 12}]
        });

        let book: BookEvent = serde_json::from_value(input.clone()).unwrap();
        assert_eq!(book.price, Some(Some(Number::from(15))));
        assert_eq!(serde_json::to_string(&book.price).unwrap(), "15");
        assert_eq!(serde_json::to_value(&book).unwrap(), input);
    }
}
