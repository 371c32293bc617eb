//! Counseling text from a rating, the dominant factor and the search windows.
//!
//! Output is fully determined by the input: the same rating, factor and
//! windows always produce the same three strings.

use muhurta_core::{Domain, Factor, Rating};
use serde::Serialize;

use crate::window_types::Window;

/// Confidence cut-offs for the decision-making line.
pub const HIGH_CONFIDENCE_SCORE: f64 = 80.0;
pub const MODERATE_CONFIDENCE_SCORE: f64 = 60.0;

/// Everything the composer looks at.
#[derive(Debug, Clone, Copy)]
pub struct CompositionInput<'a> {
    /// Rating and score on the reference date; `None` when it could not be
    /// evaluated.
    pub current: Option<(Rating, f64)>,
    pub dominant: Option<&'a Factor>,
    /// Date ordered; the first entry is the next window.
    pub favorable_windows: &'a [Window],
    pub challenging_periods: &'a [Window],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Counseling {
    pub current_advice: String,
    pub long_term_planning: String,
    pub decision_making: String,
}

/// Template-based recommendation composer for one domain.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationComposer {
    /// Plural noun phrase, e.g. "career moves".
    subject: String,
    high_confidence: f64,
    moderate_confidence: f64,
}

impl RecommendationComposer {
    pub fn new(subject: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            high_confidence: HIGH_CONFIDENCE_SCORE,
            moderate_confidence: MODERATE_CONFIDENCE_SCORE,
        }
    }

    pub fn for_domain(domain: Domain) -> Self {
        Self::new(match domain {
            Domain::Marriage => "relationship decisions",
            Domain::Career => "career moves",
            Domain::Finance => "financial commitments",
            Domain::Charity => "charitable giving",
            Domain::Fasting => "fasting observances",
        })
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn compose(&self, input: &CompositionInput<'_>) -> Counseling {
        Counseling {
            current_advice: self.current_advice(input),
            long_term_planning: self.long_term_planning(input),
            decision_making: self.decision_making(input),
        }
    }

    fn current_advice(&self, input: &CompositionInput<'_>) -> String {
        let subject = &self.subject;
        let influence = input
            .dominant
            .map(|f| format!(" The strongest influence is {}.", f.identity))
            .unwrap_or_default();
        let Some((rating, _)) = input.current else {
            return format!(
                "Current timing could not be evaluated. Base {subject} on the windows below."
            );
        };
        match rating {
            Rating::Excellent | Rating::VeryGood => format!(
                "Current timing is favorable ({rating}).{influence} This is a good time to proceed with {subject}."
            ),
            Rating::Good => format!(
                "Current timing is supportive of {subject}.{influence} Steady, deliberate steps should go well."
            ),
            Rating::Moderate => format!(
                "Current timing calls for awareness.{influence} Weigh {subject} carefully before committing."
            ),
            Rating::Challenging => format!(
                "Current timing calls for patience.{influence} Prepare the ground rather than launching {subject} now."
            ),
            Rating::Difficult => format!(
                "Exercise caution: current timing does not support major {subject}."
            ),
        }
    }

    fn long_term_planning(&self, input: &CompositionInput<'_>) -> String {
        let subject = &self.subject;
        let next = input.favorable_windows.first();
        let favorable_now = input
            .current
            .is_some_and(|(rating, _)| rating >= Rating::VeryGood);
        let mut text = if favorable_now {
            let mut t = format!("Timing is favorable now; consider moving forward with {subject}.");
            if let Some(w) = next {
                t.push_str(&format!(
                    " The next favorable window runs {} to {}.",
                    w.start(),
                    w.end()
                ));
            }
            t
        } else if let Some(w) = next {
            format!(
                "Consider moving forward with {subject} during the favorable window from {} to {} (peak score {:.0}).",
                w.start(),
                w.end(),
                w.score()
            )
        } else {
            format!(
                "No favorable window appears in the search horizon; revisit {subject} at a later date."
            )
        };
        if let Some(c) = input.challenging_periods.first() {
            text.push_str(&format!(
                " Avoid {} to {}, the next challenging period.",
                c.start(),
                c.end()
            ));
        }
        text
    }

    fn decision_making(&self, input: &CompositionInput<'_>) -> String {
        let subject = &self.subject;
        let Some((_, score)) = input.current else {
            return format!(
                "Confidence unavailable: rely on the favorable windows when planning {subject}."
            );
        };
        if score >= self.high_confidence {
            format!("High confidence: current timing strongly supports {subject}.")
        } else if score >= self.moderate_confidence {
            format!(
                "Moderate confidence: timing is supportive of {subject}, but weigh other considerations."
            )
        } else {
            format!(
                "Low confidence: current timing offers little support; defer major {subject} if possible."
            )
        }
    }
}
