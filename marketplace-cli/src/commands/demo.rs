//! Demo command - deploy a sample brand with one book and one blog post.

use colored::Colorize;
use marketplace_webhooks::{BookEvent, BrandEvent, MarketplaceClient, SeoEvent};

use crate::commands::health::ensure_healthy;
use crate::error::CliResult;

pub fn sample_brand() -> BrandEvent {
    BrandEvent::new("Python Mastery Press")
        .with_tagline("Master Python with AI-Generated Guides")
        .with_colors("#3776AB", "#FFD43B")
        .with_hero(
            "Learn Python the Smart Way",
            "AI-powered books designed for modern developers",
        )
        .with_button_text("Start Learning")
        .with_feature("newsletter", true)
        .with_feature("reviews", true)
        .with_feature("socialSharing", true)
}

pub fn sample_book() -> BookEvent {
    BookEvent::new("Python for Data Science: A Complete Guide")
        .with_author("AI Assistant")
        .with_price(14.99)
        .with_sale_price(9.99)
        .with_descriptions(
            "Master data science with Python in this comprehensive guide.",
            "Learn Python data science from scratch. Covers pandas, NumPy, matplotlib, \
             scikit-learn, and more. Perfect for beginners and intermediate developers.",
        )
        .with_categories(["Programming", "Data Science"])
        .with_tags(["python", "data-science", "machine-learning", "pandas"])
        .with_word_count(52_000)
        .with_chapter(1, "Python Fundamentals")
        .with_chapter(2, "NumPy Arrays")
        .with_chapter(3, "Pandas DataFrames")
        .with_chapter(4, "Data Visualization")
        .with_chapter(5, "Machine Learning Basics")
        .with_features([
            "50+ code examples",
            "Real-world projects",
            "Interactive exercises",
            "Lifetime updates",
        ])
}

pub fn sample_post() -> SeoEvent {
    SeoEvent::new(
        "Getting Started with Python Data Science",
        concat!(
            "<h2>Why Python for Data Science?</h2>",
            "<p>Python has become the leading language for data science thanks to its ",
            "simplicity and libraries.</p>",
            "<h3>Essential Libraries</h3>",
            "<ul>",
            "<li><strong>NumPy:</strong> Numerical computing with arrays</li>",
            "<li><strong>Pandas:</strong> Data manipulation and analysis</li>",
            "<li><strong>Matplotlib:</strong> Data visualization</li>",
            "<li><strong>Scikit-learn:</strong> Machine learning algorithms</li>",
            "</ul>",
            "<h3>Learn More</h3>",
            "<p>Want a comprehensive guide? Check out our complete Python data science book.</p>",
        ),
    )
    .with_meta_description(
        "Learn how to start your data science journey with Python. \
         This guide covers essential libraries and tools.",
    )
    .with_keywords("python, data science, pandas, numpy, beginner guide")
    .with_related_book(true)
}

/// Health check, then brand, book and post in order. Stops at the first error.
pub async fn run(client: &MarketplaceClient) -> CliResult<()> {
    ensure_healthy(client).await?;

    let brand = client.notify_brand_created(&sample_brand()).await?;
    let book = client
        .notify_book_generated(&brand.brand_id, &sample_book(), None, None)
        .await?;
    let post = client
        .notify_seo_generated(&brand.brand_id, &sample_post())
        .await?;

    let base = client.base_url();
    println!();
    println!("  {}", "Brand deployed to marketplace".green().bold());
    println!("  {} {}{}", "Brand URL:".bright_white().bold(), base, brand.url);
    println!("  {} {}{}", "Blog URL: ".bright_white().bold(), base, post.post_url);
    println!();
    println!("  The marketplace now has:");
    println!("    - 1 brand ({})", brand.brand_id.cyan());
    println!("    - {} book(s)", book.catalog_size);
    println!("    - 1 blog post");
    println!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_data_is_complete() {
        let book = sample_book();
        assert_eq!(book.chapters.clone().flatten().map(|c| c.len()), Some(5));
        assert_eq!(serde_json::to_value(&book).unwrap()["salePrice"], 9.99);

        let brand = serde_json::to_value(sample_brand()).unwrap();
        assert_eq!(brand["features"]["socialSharing"], true);

        let post = sample_post();
        assert_eq!(post.related_book, Some(Some(true)));
        assert!(post.content.starts_with("<h2>"));
    }
}
