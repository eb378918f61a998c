//! src/batch.rs
//! One indexed original, many modified buffers.

use std::borrow::Cow;

use logging::trace_batch;
use matching::SeamBase;
use quality::{DamageMeter, HammingStat};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::comparison::Comparison;
use crate::error::Error;
use crate::settings::ComparisonSettings;

/// Bytes after the configured bleaches; borrowed when there are none.
fn bleached<'a>(bytes: &'a [u8], settings: &ComparisonSettings) -> Cow<'a, [u8]> {
    if settings.bleach.is_empty() {
        Cow::Borrowed(bytes)
    } else {
        let mut copy = bytes.to_vec();
        bleach::bleach_all(&settings.bleach, &mut copy, settings.endian);
        Cow::Owned(copy)
    }
}

/// Compares any number of modified buffers against one original.
///
/// The original is bleached, fingerprinted and indexed once. Comparisons
/// only read it, so a `BatchDiff` can be shared between threads.
#[derive(Debug)]
pub struct BatchDiff {
    original: Vec<u8>,
    base: SeamBase,
    settings: ComparisonSettings,
}

impl BatchDiff {
    /// Indexes `original`.
    ///
    /// # Errors
    ///
    /// [`Error::Match`] when `original` is shorter than one window.
    pub fn new(original: &[u8], settings: ComparisonSettings) -> Result<Self, Error> {
        let original = bleached(original, &settings).into_owned();
        let base = SeamBase::index(
            &original,
            settings.roller,
            settings.endian,
            settings.metric,
            &settings.tree,
        )?;
        trace_batch!(
            bytes = original.len(),
            roller = %settings.roller,
            metric = %settings.metric,
            "indexed original"
        );
        Ok(Self {
            original,
            base,
            settings,
        })
    }

    /// Settings in use.
    #[must_use]
    pub const fn settings(&self) -> &ComparisonSettings {
        &self.settings
    }

    /// The indexed original.
    #[must_use]
    pub const fn base(&self) -> &SeamBase {
        &self.base
    }

    /// Compares one modified buffer.
    ///
    /// # Errors
    ///
    /// [`Error::Match`] on a broken seam contract.
    pub fn compare(&self, modified: &[u8]) -> Result<Comparison, Error> {
        let settings = &self.settings;
        let modified = bleached(modified, settings);
        let fingerprints = settings.roller.index(&modified, settings.endian);

        let mut diff = self.base.approximate(&fingerprints, &settings.sampling)?;
        let healing = if settings.heal {
            Some(diff.heal(&self.original, &modified)?)
        } else {
            None
        };

        let stats = HammingStat::of_diff(&diff, &self.original, &modified);
        let quality = DamageMeter::new(settings.thresholds).assess(&diff, &stats);
        trace_batch!(
            bytes = modified.len(),
            seams = diff.overall().len(),
            outliers = diff.outlier_count(),
            quality = %quality,
            "compared"
        );

        Ok(Comparison {
            diff,
            healing,
            stats,
            quality,
        })
    }

    /// Compares each buffer in turn.
    pub fn compare_all<'a>(
        &self,
        modified: impl IntoIterator<Item = &'a [u8]>,
    ) -> Vec<Result<Comparison, Error>> {
        modified.into_iter().map(|bytes| self.compare(bytes)).collect()
    }

    /// Compares the buffers on the rayon thread pool; results keep input
    /// order and equal those of [`compare_all`](Self::compare_all).
    #[cfg(feature = "parallel")]
    #[cfg_attr(docsrs, doc(cfg(feature = "parallel")))]
    pub fn compare_all_par(&self, modified: &[&[u8]]) -> Vec<Result<Comparison, Error>> {
        modified.par_iter().map(|bytes| self.compare(bytes)).collect()
    }
}

/// Compares `modified` against `original` in one go.
///
/// # Errors
///
/// As [`BatchDiff::new`] and [`BatchDiff::compare`].
pub fn compare(
    original: &[u8],
    modified: &[u8],
    settings: &ComparisonSettings,
) -> Result<Comparison, Error> {
    BatchDiff::new(original, settings.clone())?.compare(modified)
}
