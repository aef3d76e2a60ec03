use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, warn};

pub mod http;

// 属名として認めるか（認めたものだけ斜体にする）
pub trait GenusValidator {
    fn is_valid(&mut self, genus: &str) -> bool;
}

// 問い合わせをせずすべて認める
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAllGenera;

impl GenusValidator for AcceptAllGenera {
    fn is_valid(&mut self, _genus: &str) -> bool {
        true
    }
}

// 外部データベースへの問い合わせ
pub trait GenusLookup {
    fn lookup(&self, genus: &str) -> Result<bool>;
}

impl<L: GenusLookup + ?Sized> GenusLookup for &L {
    fn lookup(&self, genus: &str) -> Result<bool> {
        (**self).lookup(genus)
    }
}

/// Memoizes one verdict per genus for the lifetime of the validator.
///
/// A failed lookup is logged and remembered as `false`; it is not retried.
pub struct CachedGenusValidator<L> {
    lookup: L,
    verdicts: HashMap<String, bool>,
}

impl<L: GenusLookup> CachedGenusValidator<L> {
    pub fn new(lookup: L) -> Self {
        CachedGenusValidator {
            lookup,
            verdicts: HashMap::new(),
        }
    }

    pub fn verdicts(&self) -> &HashMap<String, bool> {
        &self.verdicts
    }
}

impl<L: GenusLookup> GenusValidator for CachedGenusValidator<L> {
    fn is_valid(&mut self, genus: &str) -> bool {
        if let Some(&valid) = self.verdicts.get(genus) {
            return valid;
        }

        let valid = match self.lookup.lookup(genus) {
            Ok(true) => {
                debug!("genus {:?}: verified", genus);
                true
            }
            Ok(false) => {
                debug!("genus {:?}: not found", genus);
                false
            }
            Err(err) => {
                warn!("Failed to verify genus {:?}: {:#}", genus, err);
                false
            }
        };

        self.verdicts.insert(genus.to_owned(), valid);
        valid
    }
}
