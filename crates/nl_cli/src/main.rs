use clap::{Parser, Subcommand};
use nl_core::Level;
use std::path::PathBuf;

mod commands;
mod logging;
mod render;

#[derive(Parser, Debug)]
#[command(author, version, about = "Read the news and build your vocabulary", long_about = None)]
pub struct Cli {
    #[arg(long, help = "User service base URL")]
    user_api: Option<String>,
    #[arg(long, help = "Content service base URL")]
    content_api: Option<String>,
    #[arg(long, help = "Learning service base URL")]
    learning_api: Option<String>,
    #[arg(long, help = "Dictionary API base URL")]
    dictionary_api: Option<String>,
    #[arg(long, help = "Where the signed-in session is stored")]
    credentials: Option<PathBuf>,
    /// Use bundled articles and an in-memory vocabulary instead of the services.
    /// The vocabulary is not saved: words saved offline are gone when the command exits.
    #[arg(long)]
    offline: bool,
    #[arg(short, long)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List articles, your level first
    Feed {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, help = "Category name, or \"all\"")]
        category: Option<String>,
        #[arg(long)]
        level: Option<Level>,
    },
    /// Read an article with saved words highlighted
    Read { article_id: String },
    /// Select text in an article and show what would be saved
    Select { article_id: String, text: String },
    /// Look up a word in the dictionary
    Lookup { word: String },
    /// Save a word from an article to your vocabulary
    SaveWord {
        article_id: String,
        word: String,
        #[arg(long, help = "Defaults to the dictionary's first definition")]
        definition: Option<String>,
    },
    /// Save a sentence from an article with its context
    SaveSentence { article_id: String, sentence: String },
    /// List saved words
    Words {
        #[arg(long)]
        search: Option<String>,
    },
    /// List saved sentences
    Sentences {
        #[arg(long)]
        search: Option<String>,
    },
    /// Delete a saved word
    RemoveWord { id: String },
    /// Delete a saved sentence
    RemoveSentence { id: String },
    /// Sign in with an OAuth authorization code
    Login { code: String },
    /// Forget the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Change your reading level
    #[command(name = "level")]
    SetLevel { level: Level },
    /// Article and vocabulary totals
    Stats,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let app = commands::App::from_cli(&cli).await?;
    commands::run(&app, cli.command).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_offline_help_says_vocabulary_is_not_kept() {
        let mut command = Cli::command();
        let help = command.render_long_help().to_string();
        let help = help.split_whitespace().collect::<Vec<_>>().join(" ");
        assert!(help.contains("words saved offline are gone when the command exits"));
    }

    #[test]
    fn test_parse_offline_save_word() {
        let cli = Cli::try_parse_from([
            "newslingo",
            "--offline",
            "save-word",
            "1",
            "loyal",
            "--definition",
            "faithful",
        ])
        .unwrap();
        assert!(cli.offline);
        assert!(matches!(cli.command, Commands::SaveWord { .. }));
    }
}
