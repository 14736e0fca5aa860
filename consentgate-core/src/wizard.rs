//! Four-step "add from catalog" wizard.
//!
//! 1. category, 2. display item, 3. source, 4. review.
//! Filling the current step's field moves the wizard forward, on through any
//! later steps that are already filled in (a hospital selected beforehand
//! carries it straight to review). Nothing ever moves it backwards except
//! `back()`. The step index stays within `[1, 4]`.

use crate::catalog::Vocabulary;
use crate::error::{CoreError, Result};
use crate::record::CatalogCreate;
use crate::scope::Scope;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

/// Free-text sources shorter than this do not advance the wizard
pub const MIN_SOURCE_CHARS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceMode {
    /// The patient's previously selected hospital
    Hospital,
    /// Free text typed by the patient
    Other,
}

#[derive(Debug, Clone)]
pub struct CatalogWizard {
    vocabulary: Vocabulary,
    scope: Scope,
    step: u8,
    category: String,
    item: String,
    source_mode: SourceMode,
    other_source: String,
    hospital: Option<String>,
}

impl CatalogWizard {
    pub fn new(vocabulary: Vocabulary, scope: Scope) -> Self {
        Self {
            vocabulary,
            scope,
            step: FIRST_STEP,
            category: String::new(),
            item: String::new(),
            source_mode: SourceMode::Hospital,
            other_source: String::new(),
            hospital: None,
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn source_mode(&self) -> SourceMode {
        self.source_mode
    }

    pub fn hospital(&self) -> Option<&str> {
        self.hospital.as_deref()
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Switching scope invalidates the chosen category and item.
    pub fn set_scope(&mut self, scope: Scope) {
        if scope != self.scope {
            self.scope = scope;
            self.category.clear();
            self.item.clear();
        }
    }

    /// Empty string clears the category.
    pub fn set_category(&mut self, category: &str) -> Result<()> {
        if !category.is_empty() && self.vocabulary.category(self.scope, category).is_none() {
            return Err(CoreError::InvalidValue {
                kind: "category",
                value: category.to_string(),
            });
        }
        if category != self.category {
            self.category = category.to_string();
            self.item.clear();
        }
        self.advance_from(1);
        Ok(())
    }

    /// Empty string clears the item.
    pub fn set_item(&mut self, item: &str) -> Result<()> {
        if !item.is_empty() && !self.vocabulary.contains(self.scope, &self.category, item) {
            return Err(CoreError::InvalidValue {
                kind: "catalog item",
                value: item.to_string(),
            });
        }
        self.item = item.to_string();
        self.advance_from(2);
        Ok(())
    }

    pub fn set_source_mode(&mut self, mode: SourceMode) {
        self.source_mode = mode;
        self.advance_from(3);
    }

    pub fn set_other_source(&mut self, text: &str) {
        self.other_source = text.to_string();
        self.advance_from(3);
    }

    /// The patient's selected hospital, if any
    pub fn set_hospital(&mut self, hospital: Option<String>) {
        self.hospital = hospital.filter(|h| !h.trim().is_empty());
        self.advance_from(3);
    }

    /// Auto-advance after the field of `step` changed
    fn advance_from(&mut self, step: u8) {
        if self.step != step {
            return;
        }
        while self.step < LAST_STEP && self.step_valid(self.step) {
            self.step += 1;
        }
    }

    fn trimmed_other(&self) -> &str {
        self.other_source.trim()
    }

    /// Whether the field owned by `step` is filled in
    pub fn step_valid(&self, step: u8) -> bool {
        match step {
            1 => !self.category.is_empty(),
            2 => !self.item.is_empty(),
            3 => match self.source_mode {
                SourceMode::Hospital => self.hospital.is_some(),
                SourceMode::Other => self.trimmed_other().chars().count() >= MIN_SOURCE_CHARS,
            },
            4 => self.can_submit(),
            _ => false,
        }
    }

    pub fn next(&mut self) {
        if self.step < LAST_STEP && self.step_valid(self.step) {
            self.step += 1;
        }
    }

    pub fn back(&mut self) {
        if self.step > FIRST_STEP {
            self.step -= 1;
        }
    }

    pub fn can_submit(&self) -> bool {
        if self.step != LAST_STEP || self.item.is_empty() {
            return false;
        }
        match self.source_mode {
            SourceMode::Hospital => self.hospital.is_some(),
            SourceMode::Other => !self.trimmed_other().is_empty(),
        }
    }

    pub fn issuer(&self) -> Option<String> {
        match self.source_mode {
            SourceMode::Hospital => self.hospital.clone(),
            SourceMode::Other => {
                Some(self.trimmed_other().to_string()).filter(|s| !s.is_empty())
            }
        }
    }

    /// Payload for the catalog creation call, once submission is allowed
    pub fn submission(&self) -> Option<CatalogCreate> {
        self.can_submit().then(|| CatalogCreate {
            scope: self.scope,
            display: self.item.clone(),
            issuer: self.issuer(),
        })
    }

    /// Back to step 1 with every field cleared. The hospital selection is kept.
    pub fn reset(&mut self) {
        self.step = FIRST_STEP;
        self.category.clear();
        self.item.clear();
        self.source_mode = SourceMode::Hospital;
        self.other_source.clear();
    }
}
