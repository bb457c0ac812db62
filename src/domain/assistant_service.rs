//! The external generative text/image boundary.
//!
//! [`CreativeAssistant`] is the seam: an opaque request/response provider
//! that drafts lesson-plan prose and coloring-sheet images. The service
//! wrapping it never lets a provider failure escape — every text path
//! degrades to a fixed fallback message and the image path degrades to
//! `None`, leaving the caller to show a retry affordance.
//!
//! Calls are the only suspension points in the system and there is no
//! cancellation: when a newer request is issued while an older one is in
//! flight, the older completion is marked superseded so the caller drops
//! it instead of displaying a stale result.

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::storage::SlotConnection;

const HISTORY_SLOT: &str = "theme_history";
const HISTORY_CAP: usize = 5;

const IDEAS_EMPTY_FALLBACK: &str = "Não foi possível gerar sugestões. Tente novamente.";
const IDEAS_ERROR_FALLBACK: &str =
    "Ocorreu um erro ao buscar sugestões. Verifique sua chave de API e a conexão.";
const THEME_EMPTY_FALLBACK: &str = "A Criação do Mundo";
const THEME_ERROR_FALLBACK: &str = "A Arca de Noé";
const PLAN_EMPTY_FALLBACK: &str = "Não foi possível gerar o plano de aula. Tente novamente.";
const PLAN_ERROR_FALLBACK: &str = "Ocorreu um erro ao gerar o plano de aula. Tente novamente.";

/// The external text/image generation provider. Implementations wrap a
/// remote API; tests inject doubles. No retry or backoff is assumed.
#[async_trait]
pub trait CreativeAssistant: Send + Sync {
    /// Theme suggestions for an age group, one idea per entry
    async fn lesson_ideas(&self, age_group: &str) -> Result<Vec<String>>;

    /// A single short theme suggestion
    async fn suggest_theme(&self, age_group: &str) -> Result<String>;

    /// Title variations strictly on the given theme
    async fn theme_variations(&self, theme: &str, age_group: &str) -> Result<Vec<String>>;

    /// A full lesson-plan draft in prose
    async fn lesson_plan(&self, theme: &str, age_group: &str) -> Result<String>;

    /// An encoded coloring-sheet image, or None when the provider
    /// produced nothing
    async fn coloring_image(&self, theme: &str) -> Result<Option<String>>;
}

/// One remembered theme search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeQuery {
    pub theme: String,
    pub age_group: String,
}

/// A completed assistant call. `superseded` is set when a newer request
/// was issued while this one was in flight; the caller should then drop
/// the value instead of displaying it.
#[derive(Debug, Clone)]
pub struct AssistantOutcome<T> {
    pub value: T,
    pub superseded: bool,
}

/// Service wrapping the creative assistant with fallbacks, display
/// supersession and the bounded theme search history
#[derive(Clone)]
pub struct AssistantService {
    assistant: Arc<dyn CreativeAssistant>,
    connection: Arc<SlotConnection>,
    latest_request: Arc<AtomicU64>,
}

impl AssistantService {
    /// Create a new AssistantService around an injected provider
    pub fn new(assistant: Arc<dyn CreativeAssistant>, connection: Arc<SlotConnection>) -> Self {
        Self {
            assistant,
            connection,
            latest_request: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Theme suggestions for an age group. Falls back to a single
    /// explanatory entry on failure or an empty reply.
    pub async fn lesson_ideas(&self, age_group: &str) -> AssistantOutcome<Vec<String>> {
        let ticket = self.issue_ticket();
        debug!("Requesting lesson ideas for {}", age_group);

        let value = match self.assistant.lesson_ideas(age_group).await {
            Ok(ideas) => {
                let ideas: Vec<String> = ideas
                    .into_iter()
                    .map(|idea| idea.trim().to_string())
                    .filter(|idea| !idea.is_empty())
                    .collect();
                if ideas.is_empty() {
                    vec![IDEAS_EMPTY_FALLBACK.to_string()]
                } else {
                    ideas
                }
            }
            Err(e) => {
                warn!("Lesson idea generation failed: {}", e);
                vec![IDEAS_ERROR_FALLBACK.to_string()]
            }
        };

        self.outcome(ticket, value)
    }

    /// A single random theme suggestion, always usable as a search term
    pub async fn suggest_theme(&self, age_group: &str) -> AssistantOutcome<String> {
        let ticket = self.issue_ticket();

        let value = match self.assistant.suggest_theme(age_group).await {
            Ok(theme) if !theme.trim().is_empty() => theme.trim().to_string(),
            Ok(_) => THEME_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                warn!("Theme suggestion failed: {}", e);
                THEME_ERROR_FALLBACK.to_string()
            }
        };

        self.outcome(ticket, value)
    }

    /// Title variations on a theme. An empty base theme, a failure or an
    /// empty reply all yield an empty list.
    pub async fn theme_variations(
        &self,
        theme: &str,
        age_group: &str,
    ) -> AssistantOutcome<Vec<String>> {
        let ticket = self.issue_ticket();

        if theme.trim().is_empty() {
            return self.outcome(ticket, Vec::new());
        }

        let value = match self.assistant.theme_variations(theme, age_group).await {
            Ok(variations) => variations
                .into_iter()
                .map(|variation| variation.trim().to_string())
                .filter(|variation| !variation.is_empty())
                .collect(),
            Err(e) => {
                warn!("Theme variation generation failed: {}", e);
                Vec::new()
            }
        };

        self.outcome(ticket, value)
    }

    /// Draft a lesson plan for a theme. The search is recorded in the
    /// theme history before the provider is called.
    pub async fn generate_lesson_plan(
        &self,
        theme: &str,
        age_group: &str,
    ) -> AssistantOutcome<String> {
        let ticket = self.issue_ticket();
        info!("Generating lesson plan for theme '{}'", theme);

        self.record_theme_query(theme, age_group);

        let value = match self.assistant.lesson_plan(theme, age_group).await {
            Ok(plan) if !plan.trim().is_empty() => plan,
            Ok(_) => PLAN_EMPTY_FALLBACK.to_string(),
            Err(e) => {
                warn!("Lesson plan generation failed: {}", e);
                PLAN_ERROR_FALLBACK.to_string()
            }
        };

        self.outcome(ticket, value)
    }

    /// Generate a coloring-sheet image for a theme. `None` means the
    /// caller should offer a retry.
    pub async fn generate_coloring_image(&self, theme: &str) -> AssistantOutcome<Option<String>> {
        let ticket = self.issue_ticket();
        info!("Generating coloring image for theme '{}'", theme);

        let value = match self.assistant.coloring_image(theme).await {
            Ok(image) => image,
            Err(e) => {
                warn!("Coloring image generation failed: {}", e);
                None
            }
        };

        self.outcome(ticket, value)
    }

    /// The remembered theme searches, most recent first
    pub fn theme_history(&self) -> Vec<ThemeQuery> {
        self.connection.load_slot(HISTORY_SLOT, Vec::new())
    }

    /// Forget every remembered theme search
    pub fn clear_history(&self) {
        self.connection.clear_slot(HISTORY_SLOT);
    }

    fn record_theme_query(&self, theme: &str, age_group: &str) {
        let theme = theme.trim();
        if theme.is_empty() {
            return;
        }

        let mut history = self.theme_history();
        history.retain(|entry| entry.theme.to_lowercase() != theme.to_lowercase());
        history.insert(
            0,
            ThemeQuery {
                theme: theme.to_string(),
                age_group: age_group.to_string(),
            },
        );
        history.truncate(HISTORY_CAP);

        self.connection.save_slot(HISTORY_SLOT, &history);
    }

    fn issue_ticket(&self) -> u64 {
        self.latest_request.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn outcome<T>(&self, ticket: u64, value: T) -> AssistantOutcome<T> {
        let superseded = self.latest_request.load(Ordering::SeqCst) != ticket;
        if superseded {
            debug!("Assistant request {} superseded by a newer one", ticket);
        }
        AssistantOutcome { value, superseded }
    }
}
