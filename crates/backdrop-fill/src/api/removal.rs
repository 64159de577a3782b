//! Outcome of running the remover on one image.

use crate::color::Rgb;

/// What the remover saw and did.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Diagnostics {
    /// Border samples counted (fully transparent band pixels excluded).
    pub sampled: u32,
    /// Most frequent border colors with their counts, most frequent first.
    pub dominant: Vec<(Rgb, u32)>,
    /// Colors treated as backdrop.
    pub targets: Vec<Rgb>,
    /// Perimeter pixels that seeded the fill.
    pub seeds: usize,
    /// Pixels erased, or that would be erased by an unapplied plan.
    pub removed: usize,
}

/// Result of [`BackdropRemover::remove`](crate::BackdropRemover::remove).
///
/// Only [`Removal::Cleared`] means the image was modified.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal {
    /// No border color qualified as backdrop; nothing was attempted.
    NoBackdrop { diagnostics: Diagnostics },
    /// A backdrop was identified but the fill erased no pixels.
    Unchanged { diagnostics: Diagnostics },
    /// The fill would have erased more than the configured maximum share of
    /// the image; the image was left untouched.
    Refused {
        diagnostics: Diagnostics,
        /// Share of the image the fill would have erased.
        fraction: f64,
    },
    /// Backdrop pixels were erased.
    Cleared { diagnostics: Diagnostics },
}

impl Removal {
    pub fn diagnostics(&self) -> &Diagnostics {
        match self {
            Removal::NoBackdrop { diagnostics }
            | Removal::Unchanged { diagnostics }
            | Removal::Refused { diagnostics, .. }
            | Removal::Cleared { diagnostics } => diagnostics,
        }
    }

    /// Pixels actually erased (0 unless [`Removal::Cleared`]).
    pub fn removed(&self) -> usize {
        match self {
            Removal::Cleared { diagnostics } => diagnostics.removed,
            _ => 0,
        }
    }

    /// Whether the image was modified.
    #[inline]
    pub fn is_modified(&self) -> bool {
        matches!(self, Removal::Cleared { .. })
    }
}
