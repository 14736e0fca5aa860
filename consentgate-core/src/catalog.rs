//! Controlled vocabulary for catalog-created records.

use crate::scope::Scope;

/// A named group of display items within one scope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    pub name: &'static str,
    pub items: &'static [&'static str],
}

/// Category lists per scope. Dashboards receive this as data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vocabulary {
    pub immunizations: &'static [Category],
    pub allergies: &'static [Category],
    pub conditions: &'static [Category],
}

const IMMUNIZATIONS: &[Category] = &[
    Category {
        name: "Routine childhood",
        items: &["DTaP", "Hepatitis B", "Hib", "MMR", "Polio (IPV)", "Varicella"],
    },
    Category {
        name: "Seasonal",
        items: &["Influenza", "COVID-19", "RSV"],
    },
    Category {
        name: "Travel",
        items: &["Hepatitis A", "Typhoid", "Yellow fever"],
    },
];

const ALLERGIES: &[Category] = &[
    Category {
        name: "Food",
        items: &["Egg", "Milk", "Peanut", "Shellfish", "Tree nuts", "Wheat"],
    },
    Category {
        name: "Medication",
        items: &["Amoxicillin", "Aspirin", "Ibuprofen", "Penicillin", "Sulfonamides"],
    },
    Category {
        name: "Environmental",
        items: &["Bee venom", "Dust mites", "Latex", "Pet dander", "Pollen"],
    },
];

const CONDITIONS: &[Category] = &[
    Category {
        name: "Chronic",
        items: &["Asthma", "Hypertension", "Type 1 diabetes", "Type 2 diabetes"],
    },
    Category {
        name: "Developmental",
        items: &["ADHD", "Autism spectrum disorder"],
    },
    Category {
        name: "Other",
        items: &["Celiac disease", "Eczema", "Migraine"],
    },
];

impl Vocabulary {
    pub const STANDARD: Vocabulary = Vocabulary {
        immunizations: IMMUNIZATIONS,
        allergies: ALLERGIES,
        conditions: CONDITIONS,
    };

    pub fn categories(&self, scope: Scope) -> &'static [Category] {
        match scope {
            Scope::Immunizations => self.immunizations,
            Scope::Allergies => self.allergies,
            Scope::Conditions => self.conditions,
        }
    }

    pub fn category(&self, scope: Scope, name: &str) -> Option<&'static Category> {
        self.categories(scope).iter().find(|c| c.name == name)
    }

    /// Items of a category; empty for an unknown category
    pub fn items(&self, scope: Scope, category: &str) -> &'static [&'static str] {
        self.category(scope, category).map(|c| c.items).unwrap_or(&[])
    }

    pub fn contains(&self, scope: Scope, category: &str, item: &str) -> bool {
        self.items(scope, category).contains(&item)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Vocabulary::STANDARD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_scope_has_categories() {
        for scope in Scope::ALL {
            let categories = Vocabulary::STANDARD.categories(scope);
            assert!(!categories.is_empty(), "{} has no categories", scope);
            for category in categories {
                assert!(!category.items.is_empty(), "{} is empty", category.name);
            }
        }
    }

    #[test]
    fn test_lookup() {
        let vocab = Vocabulary::STANDARD;
        assert!(vocab.contains(Scope::Allergies, "Food", "Peanut"));
        assert!(!vocab.contains(Scope::Immunizations, "Food", "Peanut"));
        assert!(vocab.items(Scope::Conditions, "Nope").is_empty());
    }
}
