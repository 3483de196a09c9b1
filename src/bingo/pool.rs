//! The item pool shared by the board and the presenter.
//!
//! A pool is an ordered list of unique, non-empty strings fixed at startup.
//! It is handed to each component's constructor rather than looked up
//! globally, so a missing or undersized pool surfaces as a
//! [`BingoError::Configuration`] for the component that needs it.

use super::error::BingoError;
use std::collections::HashSet;
use tracing::warn;

/// The built-in item set used when no pool is configured.
pub const DEFAULT_ITEMS: &[&str] = &[
    "🚨 Resolved a production incident",
    "🧠 Has an AWS certification",
    "🧳 Joined a Team's call on holiday",
    "☕ Joined a 9am meeting",
    "🧪 Pushed code directly to main (oops)",
    "🔄 Restarted a service and fixed the issue",
    "📖 Read the GenAI handbook",
    "☁️ Onboarded to DHP",
    "🗓️ Coming to office on a Friday",
    "💻 Has more than 5 tabs open right now",
    "💳 Has a CommBank Credit Card",
    "🔒 Uses a password manager",
    "🤓 Has reviewed a pull request in the last 30 mins",
    "💼 Completed the BDD workshop",
    "🔄 Has completed a SDLC",
    "📧 Has more than 100 unread emails",
    "🎫 Has created a T2 CAB ticket",
    "🔄 Has worked on IFLF",
    "🚀 Has done a Fast Track Release onboarding",
    "📚 Has started the Service Management training",
    "📊 Done a Kafka cert renewal",
    "🐶 Brought your pet to the meeting",
    "🐱 Cat has walked on your keyboard",
    "👥 Pinged someone with the same name",
    "🔀 Assigned a Jira Ticket to the wrong person / had your ticket assigned to someone else",
    "📧 Received a \"Hi\" with no context",
    "🔥 Experienced a T2 outage",
    "⭐️ Knows what Lumen is",
    "🚗 Has used GitHub actions",
    "💛 Doing Can4Cancer",
    "🧟 Attended a meeting while half-asleep",
    "🧊 Said \"It works on my machine\"",
    "🧾 Created a Jira ticket and immediately closed it",
    "🧬 Used agentic AI to write code",
    "🧛 Worked past midnight on a deploy",
    "🧘 Said \"Let's circle back on that\"",
    "🧍 Been the only one in a meeting",
    "🧪 Accidentally deployed to prod instead of staging",
    "🧑‍🚀 Used \"git push --force\" and hoped for the best",
    "🧑‍🏫 Explained something with a whiteboard",
    "🧑‍🔧 Fixed a bug by deleting code",
    "🧠 Memorized keyboard shortcuts to look efficient",
    "🧠 Explained technical debt to non-technical people",
    "😴 Dozed off during a meeting",
    "👔 Wore a formal top and pyjama bottoms",
    "📲 Sent a message to the wrong chat/channel",
    "👶 Kid accidentally sends emojis or gibberish in a work chat",
    "👵 Parent starts talking to you while you're clearly on a video call",
    "📝 Chased for approvals more than you coded",
    "🔁 Had a meeting to plan another meeting",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pool {
    items: Vec<String>,
}

impl Pool {
    /// Build a pool, trimming entries and dropping blanks and duplicates.
    /// The first occurrence of a duplicate keeps its position.
    pub fn new<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let mut unique = Vec::new();
        for item in items {
            let item: String = item.into();
            let item = item.trim();
            if item.is_empty() {
                continue;
            }
            if !seen.insert(item.to_string()) {
                warn!(item, "dropping duplicate pool item");
                continue;
            }
            unique.push(item.to_string());
        }
        Self { items: unique }
    }

    /// Parse a pool from text: one item per line, blank lines and lines
    /// starting with `#` are ignored.
    pub fn from_text(text: &str) -> Self {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_ITEMS.iter().copied())
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, item: &str) -> bool {
        self.items.iter().any(|i| i == item)
    }

    /// Fail with a configuration error unless the pool holds at least `min`
    /// items.
    pub fn require(&self, component: &'static str, min: usize) -> Result<(), BingoError> {
        if self.items.len() < min {
            let reason = if self.items.is_empty() {
                "no bingo items available".to_string()
            } else {
                format!(
                    "pool has {} items but at least {} are required",
                    self.items.len(),
                    min
                )
            };
            return Err(BingoError::Configuration { component, reason });
        }
        Ok(())
    }
}
