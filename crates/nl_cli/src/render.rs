use crossterm::style::Stylize;
use nl_core::stats::Dashboard;
use nl_core::text::{render_with, SavedWords, Selection, SelectionKind};
use nl_core::{Article, SavedSentence, User, VocabularyWord, WordDefinition};
use nl_reader::ReadingSession;

pub fn article_line(article: &Article) -> String {
    format!(
        "{:>4}  {:<12} {:<14} {:>2} min  {}",
        article.id,
        article.level.to_string(),
        article.category,
        article.reading_time,
        article.title
    )
}

pub fn feed(articles: &[&Article], categories: &[&str]) {
    if articles.is_empty() {
        println!("No articles match these filters.");
        return;
    }
    println!("Categories: all, {}", categories.join(", "));
    println!();
    for article in articles {
        println!("{}", article_line(article));
    }
    println!();
    println!("{} articles", articles.len());
}

pub fn article(session: &ReadingSession, saved: &SavedWords) {
    let article = session.article();
    println!("{}", article.title.as_str().bold());
    println!(
        "{} · {} · {} · {} min read",
        article.level,
        article.category,
        article.published_at.format("%Y-%m-%d"),
        article.reading_time
    );
    if let Some(image) = article.large_image_url() {
        println!("{}", image.as_str().dim());
    }
    println!();
    if !article.summary.is_empty() {
        println!("{}", article.summary.as_str().italic());
        println!();
    }
    for tokens in session.render(saved) {
        println!("{}", render_with(&tokens, |word| word.on_yellow().black().to_string()));
        println!();
    }
}

pub fn definition(def: &WordDefinition) {
    match &def.phonetic {
        Some(phonetic) => println!("{}  {}", def.word.as_str().bold(), phonetic.as_str().magenta()),
        None => println!("{}", def.word.as_str().bold()),
    }
    for audio in &def.audio {
        println!("  ♪ {}", audio);
    }
    for meaning in &def.meanings {
        println!();
        println!("{}", meaning.part_of_speech.as_str().italic());
        for (i, text) in meaning.definitions.iter().enumerate() {
            println!("  {}. {}", i + 1, text);
        }
    }
}

pub fn selection(selection: &Selection, sentence: &str, context: &str) {
    let kind = match selection.kind() {
        SelectionKind::SingleWord => "word",
        SelectionKind::Phrase => "phrase",
    };
    println!("Selected ({}): {}", kind, selection.text().bold());
    println!("Sentence: {}", if sentence.is_empty() { "-" } else { sentence });
    println!("Context:  {}", context);
}

pub fn words(words: &[&VocabularyWord]) {
    if words.is_empty() {
        println!("No saved words.");
        return;
    }
    for word in words {
        println!("{}  {}: {}", word.id.as_str().dim(), word.word.as_str().bold(), word.definition);
        if !word.sentence.is_empty() {
            println!("    \"{}\"", word.sentence);
        }
        println!("    from {}", word.article_title);
    }
}

pub fn sentences(sentences: &[&SavedSentence]) {
    if sentences.is_empty() {
        println!("No saved sentences.");
        return;
    }
    for sentence in sentences {
        println!("{}  {}", sentence.id.as_str().dim(), sentence.sentence.as_str().bold());
        if !sentence.context.is_empty() {
            println!("    {}", sentence.context);
        }
        println!("    from {}", sentence.article_title);
    }
}

pub fn user(user: &User) {
    println!("{} <{}>", user.name, user.email);
    println!("Level: {}", user.level);
}

pub fn dashboard(dashboard: &Dashboard) {
    println!("Articles:     {}", dashboard.total_articles);
    for (level, count) in &dashboard.articles_by_level {
        println!("  {:<12} {}", level.to_string(), count);
    }
    println!("Vocabularies: {}", dashboard.total_vocabularies);
    println!("Sentences:    {}", dashboard.total_sentences);
}
