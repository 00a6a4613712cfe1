use anyhow::{anyhow, bail, Context};
use nl_core::feed::{categories, recommend, FeedFilter};
use nl_core::stats::Dashboard;
use nl_core::text::Selection;
use nl_core::{Article, Error, User};
use nl_reader::{Annotator, ReadingSession};
use nl_services::prelude::*;
use nl_services::{
    Credential, CredentialStore, HttpContent, HttpDictionary, HttpLearning, InMemoryContent,
    InMemoryLearning, ServiceConfig, UserClient,
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::{render, Cli, Commands};

pub struct App {
    config: ServiceConfig,
    store: CredentialStore,
    user: Option<User>,
    offline: bool,
}

impl App {
    pub async fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let mut config = ServiceConfig::from_env()?;
        if let Some(url) = &cli.user_api {
            config = config.with_user_api(url)?;
        }
        if let Some(url) = &cli.content_api {
            config = config.with_content_api(url)?;
        }
        if let Some(url) = &cli.learning_api {
            config = config.with_learning_api(url)?;
        }
        if let Some(url) = &cli.dictionary_api {
            config = config.with_dictionary_api(url)?;
        }
        if let Some(path) = &cli.credentials {
            config = config.with_credentials_path(path);
        }
        debug!("Using {:?}", config);

        let store = CredentialStore::new(config.credentials_path.clone());
        let user = store
            .load()
            .await
            .with_context(|| format!("reading session from {}", store.path().display()))?;

        Ok(Self {
            config,
            store,
            user,
            offline: cli.offline,
        })
    }

    fn content(&self) -> anyhow::Result<Arc<dyn ContentService>> {
        if self.offline {
            return Ok(Arc::new(InMemoryContent::with_sample_articles()?));
        }
        Ok(Arc::new(HttpContent::new(self.config.content_api.clone())?))
    }

    fn learning(&self) -> anyhow::Result<Arc<dyn LearningService>> {
        if self.offline {
            return Ok(Arc::new(InMemoryLearning::new()));
        }
        let credential = self.user.as_ref().map(Credential::from);
        Ok(Arc::new(HttpLearning::new(
            self.config.learning_api.clone(),
            credential,
        )?))
    }

    fn dictionary(&self) -> anyhow::Result<Arc<dyn DictionaryService>> {
        Ok(Arc::new(HttpDictionary::new(self.config.dictionary_api.clone())?))
    }

    async fn article(&self, id: &str) -> anyhow::Result<Article> {
        self.content()?
            .get_article(id)
            .await?
            .ok_or_else(|| anyhow!("No article with id {}", id))
    }

    /// The vocabulary is only loaded for signed-in users; anyone else reads
    /// without highlights.
    async fn annotator(&self) -> anyhow::Result<Annotator> {
        let learning = self.learning()?;
        if self.user.is_none() && !self.offline {
            return Ok(Annotator::new(learning));
        }
        Ok(Annotator::load(learning).await?)
    }

    async fn signed_in_annotator(&self) -> anyhow::Result<Annotator> {
        if self.user.is_none() && !self.offline {
            bail!(Error::Unauthenticated);
        }
        self.annotator().await
    }
}

pub async fn run(app: &App, command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Feed { search, category, level } => {
            let articles = app.content()?.list_articles().await?;
            let mut filter = FeedFilter::new().with_level(level);
            if let Some(term) = search {
                filter = filter.with_search(term);
            }
            if let Some(category) = category {
                filter = filter.with_category(category);
            }
            let user_level = app.user.as_ref().map(|u| u.level);
            let shown = recommend(filter.apply(&articles), user_level);
            render::feed(&shown, &categories(&articles));
        }
        Commands::Read { article_id } => {
            let article = app.article(&article_id).await?;
            let annotator = app.annotator().await?;
            let session = ReadingSession::new(article, app.dictionary()?);
            render::article(&session, &annotator.snapshot().saved_words());
        }
        Commands::Select { article_id, text } => {
            let article = app.article(&article_id).await?;
            let mut session = ReadingSession::new(article, app.dictionary()?);
            let Some(selection) = session.select(&text).cloned() else {
                println!("Nothing selected.");
                return Ok(());
            };
            let sentence = session.containing_sentence().unwrap_or_default();
            let context = session.context_window().unwrap_or_default();
            render::selection(&selection, &sentence, &context);
            if let Some(def) = session.wait_for_definition().await {
                println!();
                render::definition(def);
            }
        }
        Commands::Lookup { word } => {
            let Some(selection) = Selection::capture(&word) else {
                bail!("Nothing to look up");
            };
            if !selection.is_single_word() {
                bail!("Only single words can be looked up, got {:?}", selection.text());
            }
            match app.dictionary()?.lookup(selection.text()).await {
                Ok(def) => render::definition(&def),
                Err(e) => {
                    debug!("Lookup failed: {}", e);
                    println!("No definition available for {}.", selection.text());
                }
            }
        }
        Commands::SaveWord { article_id, word, definition } => {
            let article = app.article(&article_id).await?;
            let mut annotator = app.signed_in_annotator().await?;
            let definition = match definition {
                Some(definition) => definition,
                None => {
                    let def = app.dictionary()?.lookup(word.trim()).await.ok();
                    def.and_then(|d| d.first_definition().map(str::to_string))
                        .ok_or_else(|| {
                            anyhow!("No dictionary definition found, pass --definition")
                        })?
                }
            };
            let saved = annotator
                .save_word_from(&article, word.trim(), &definition)
                .await?;
            info!("Saved {} from {}", saved.word, article.id);
            println!("Saved {} ({})", saved.word, saved.id);
            if !saved.sentence.is_empty() {
                println!("  \"{}\"", saved.sentence);
            }
        }
        Commands::SaveSentence { article_id, sentence } => {
            let article = app.article(&article_id).await?;
            let mut annotator = app.signed_in_annotator().await?;
            let saved = annotator
                .save_sentence_from(&article, sentence.trim())
                .await?;
            println!("Saved sentence ({})", saved.id);
            println!("  {}", saved.context);
        }
        Commands::Words { search } => {
            let snapshot = app.signed_in_annotator().await?.snapshot();
            render::words(&snapshot.search_words(search.as_deref().unwrap_or("")));
        }
        Commands::Sentences { search } => {
            let snapshot = app.signed_in_annotator().await?.snapshot();
            render::sentences(&snapshot.search_sentences(search.as_deref().unwrap_or("")));
        }
        Commands::RemoveWord { id } => {
            let mut annotator = app.signed_in_annotator().await?;
            annotator.remove_word(&id).await?;
            println!("Removed word {}", id);
        }
        Commands::RemoveSentence { id } => {
            let mut annotator = app.signed_in_annotator().await?;
            annotator.remove_sentence(&id).await?;
            println!("Removed sentence {}", id);
        }
        Commands::Login { code } => {
            let users = UserClient::new(app.config.user_api.clone())?;
            let user = users.login(&code).await?;
            app.store.save(&user).await?;
            render::user(&user);
        }
        Commands::Logout => {
            app.store.clear().await?;
            println!("Signed out.");
        }
        Commands::Whoami => match &app.user {
            Some(user) => render::user(user),
            None => println!("Not signed in."),
        },
        Commands::SetLevel { level } => match app.store.update_level(level).await? {
            Some(user) => render::user(&user),
            None => bail!(Error::Unauthenticated),
        },
        Commands::Stats => {
            let articles = app.content()?.list_articles().await?;
            let annotator = app.annotator().await?;
            let snapshot = annotator.snapshot();
            let dashboard = Dashboard::compute(&articles, snapshot.words(), snapshot.sentences());
            render::dashboard(&dashboard);
            debug!("{}", serde_json::to_string(&dashboard)?);
        }
    }
    Ok(())
}
