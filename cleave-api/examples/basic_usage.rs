//! Basic usage example for segmentation and casing

use cleave_api::{split, titlecase, upcase, BreakKind, Options, TextSegmenter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Method 1: One-shot splitting with the convenience function
    println!("=== Method 1: Convenience Function ===");
    let sentences = split(
        "Hello world. This is a test. How are you?",
        Options::builder().kind(BreakKind::Sentence).build()?,
    )?;
    println!("Found {} sentences:", sentences.len());
    for (i, sentence) in sentences.iter().enumerate() {
        println!("  Sentence {}: {:?}", i + 1, sentence);
    }

    // Method 2: A reusable segmenter with custom options
    println!("\n=== Method 2: Reusable Segmenter ===");
    let segmenter = TextSegmenter::with_options(
        Options::builder()
            .locale("en")?
            .kind(BreakKind::Sentence)
            .trim(true)
            .build()?,
    )?;
    let text = "Dr. Smith went to the store. He bought some milk. Then he went home.";
    println!(
        "Abbreviation-aware split found {} sentences",
        segmenter.split(text).len()
    );

    // Method 3: Lazy streaming over word segments
    println!("\n=== Method 3: Streaming Words ===");
    let words = TextSegmenter::new()?;
    for segment in words.segments("The quick brown fox").take(3) {
        println!("  segment: {segment:?}");
    }

    // Method 4: Dictionary-based word breaking for Chinese
    println!("\n=== Method 4: Chinese Word Breaking ===");
    let zh = split(
        "我们明天见",
        Options::builder().locale("zh")?.build()?,
    )?;
    println!("Chinese split: {zh:?}");

    // Method 5: Locale-aware casing
    println!("\n=== Method 5: Casing ===");
    println!("{}", upcase("Diyarbakır", Some("tr"))?);
    println!("{}", titlecase("ijsselmeer", Some("nl"))?);

    Ok(())
}
