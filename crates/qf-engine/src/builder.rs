//! Question-set assembly for a round.
//!
//! Sourcing fetches one category or pools all of them, drops unusable
//! records, samples without replacement when the pool is larger than
//! the requested count, and finally applies the reverse transformation
//! when that modifier is enabled.

use rand::rngs::StdRng;
use rand::seq::{IndexedRandom, SliceRandom};

use crate::config::{CategorySelection, RoundConfig};
use crate::error::{SourceError, SourceResult};
use crate::modifier::Modifier;
use crate::question::Question;
use crate::source::QuestionSource;

/// How many distractor prompts a reverse question carries at most.
const REVERSE_DISTRACTORS: usize = 3;

/// Build the ordered question list for a round.
///
/// # Errors
///
/// Returns a [`SourceError`] when the selected category cannot be
/// fetched, or when no requested category yields a usable question.
/// The caller must not start a round on error.
pub fn build_round(
    config: &RoundConfig,
    source: &dyn QuestionSource,
    rng: &mut StdRng,
) -> SourceResult<Vec<Question>> {
    let pool = if config.pools_all_categories() {
        fetch_pooled(source)?
    } else {
        match &config.category {
            CategorySelection::Single(name) => fetch_single(source, name)?,
            CategorySelection::Mix => fetch_pooled(source)?,
        }
    };

    let selected = sample(pool, config.count, rng);

    if config.modifiers.enabled(Modifier::Reverse) {
        Ok(reverse_transform(&selected, rng))
    } else {
        Ok(selected)
    }
}

/// Fetch one category, keeping only usable records in source order.
fn fetch_single(source: &dyn QuestionSource, name: &str) -> SourceResult<Vec<Question>> {
    let raw = source.fetch_category(name)?;
    let usable: Vec<Question> = raw
        .into_iter()
        .filter(|q| q.is_usable())
        .map(|q| Question::new(q.prompt, q.options, q.answer))
        .collect();
    if usable.is_empty() {
        return Err(SourceError::NoQuestions);
    }
    Ok(usable)
}

/// Fetch every category and concatenate, tagging origin categories.
///
/// Individual category failures are skipped; the pooled fetch only
/// errors when no category contributes a usable question.
fn fetch_pooled(source: &dyn QuestionSource) -> SourceResult<Vec<Question>> {
    let mut pool = Vec::new();
    for name in source.list_categories() {
        let Ok(raw) = source.fetch_category(&name) else {
            continue;
        };
        pool.extend(raw.into_iter().filter(|q| q.is_usable()).map(|q| Question {
            prompt: q.prompt,
            options: q.options,
            answer: q.answer,
            category: Some(name.clone()),
            reverse_note: None,
        }));
    }
    if pool.is_empty() {
        return Err(SourceError::NoQuestions);
    }
    Ok(pool)
}

/// Uniform sample without replacement, or the whole pool in source
/// order when the request covers it.
fn sample(mut pool: Vec<Question>, count: usize, rng: &mut StdRng) -> Vec<Question> {
    if count >= pool.len() {
        return pool;
    }
    pool.shuffle(rng);
    pool.truncate(count);
    pool
}

/// Synthesize reverse questions: the correct answer becomes the
/// original prompt, distractors are other selected questions' prompts.
fn reverse_transform(selected: &[Question], rng: &mut StdRng) -> Vec<Question> {
    selected
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let others: Vec<&String> = selected
                .iter()
                .enumerate()
                .filter(|(j, _)| *j != i)
                .map(|(_, other)| &other.prompt)
                .collect();

            let mut options: Vec<String> = others
                .choose_multiple(rng, REVERSE_DISTRACTORS)
                .map(|p| (*p).clone())
                .collect();
            options.push(q.prompt.clone());
            options.shuffle(rng);

            Question {
                prompt: format!("Which question has this answer: {}?", q.answer),
                options,
                answer: q.prompt.clone(),
                category: q.category.clone(),
                reverse_note: Some(q.answer.clone()),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{RawQuestion, StaticSource};
    use rand::SeedableRng;

    fn raw(prompt: &str, answer: &str) -> RawQuestion {
        RawQuestion {
            prompt: prompt.to_string(),
            options: vec![answer.to_string(), "wrong a".into(), "wrong b".into()],
            answer: answer.to_string(),
        }
    }

    fn numbered(n: usize) -> Vec<RawQuestion> {
        (0..n).map(|i| raw(&format!("Q{i}?"), &format!("A{i}"))).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn no_sampling_keeps_source_order() {
        let source = StaticSource::new().with_category("Math", numbered(3));
        let config = RoundConfig::new("Math").with_count(5);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 3);
        assert_eq!(round[0].prompt, "Q0?");
        assert_eq!(round[1].prompt, "Q1?");
        assert_eq!(round[2].prompt, "Q2?");
    }

    #[test]
    fn sampling_without_replacement() {
        let source = StaticSource::new().with_category("Math", numbered(20));
        let config = RoundConfig::new("Math").with_count(5);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 5);

        let mut prompts: Vec<&str> = round.iter().map(|q| q.prompt.as_str()).collect();
        prompts.sort_unstable();
        prompts.dedup();
        assert_eq!(prompts.len(), 5, "sampled questions must be distinct");
    }

    #[test]
    fn unusable_records_dropped() {
        let mut questions = numbered(3);
        questions.push(RawQuestion {
            prompt: "Broken?".into(),
            options: vec!["a".into()],
            answer: "not present".into(),
        });
        let source = StaticSource::new().with_category("Math", questions);
        let config = RoundConfig::new("Math");
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 3);
        assert!(round.iter().all(|q| q.prompt != "Broken?"));
    }

    #[test]
    fn unknown_category_errors() {
        let source = StaticSource::new().with_category("Math", numbered(3));
        let config = RoundConfig::new("History");
        let err = build_round(&config, &source, &mut rng()).unwrap_err();
        assert_eq!(err, SourceError::UnknownCategory("History".into()));
    }

    #[test]
    fn empty_category_errors() {
        let source = StaticSource::new().with_category("Math", vec![]);
        let config = RoundConfig::new("Math");
        let err = build_round(&config, &source, &mut rng()).unwrap_err();
        assert_eq!(err, SourceError::NoQuestions);
    }

    #[test]
    fn mix_pools_and_tags_categories() {
        let source = StaticSource::new()
            .with_category("Geography", numbered(2))
            .with_category("Math", numbered(2));
        let config = RoundConfig::mix().with_count(5);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 4);
        assert_eq!(round[0].category.as_deref(), Some("Geography"));
        assert_eq!(round[2].category.as_deref(), Some("Math"));
    }

    #[test]
    fn mix_tolerates_failing_category() {
        struct Flaky {
            inner: StaticSource,
        }
        impl QuestionSource for Flaky {
            fn list_categories(&self) -> Vec<String> {
                let mut names = self.inner.list_categories();
                names.push("Cursed".into());
                names
            }
            fn fetch_category(&self, name: &str) -> SourceResult<Vec<RawQuestion>> {
                if name == "Cursed" {
                    return Err(SourceError::Fetch {
                        category: name.to_string(),
                        reason: "disk on fire".into(),
                    });
                }
                self.inner.fetch_category(name)
            }
        }

        let source = Flaky {
            inner: StaticSource::new().with_category("Math", numbered(3)),
        };
        let config = RoundConfig::mix().with_count(5);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 3);
    }

    #[test]
    fn mix_with_all_failures_errors() {
        struct AlwaysDown;
        impl QuestionSource for AlwaysDown {
            fn list_categories(&self) -> Vec<String> {
                vec!["Math".into()]
            }
            fn fetch_category(&self, name: &str) -> SourceResult<Vec<RawQuestion>> {
                Err(SourceError::Fetch {
                    category: name.to_string(),
                    reason: "offline".into(),
                })
            }
        }

        let config = RoundConfig::mix();
        let err = build_round(&config, &AlwaysDown, &mut rng()).unwrap_err();
        assert_eq!(err, SourceError::NoQuestions);
    }

    #[test]
    fn reverse_round_trip() {
        let source = StaticSource::new().with_category("Math", numbered(8));
        let config = RoundConfig::new("Math")
            .with_count(5)
            .with_modifier(Modifier::Reverse);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 5);

        for q in &round {
            // Exactly one option is the original prompt, and it is the answer.
            let matches = q.options.iter().filter(|o| **o == q.answer).count();
            assert_eq!(matches, 1);
            assert!(q.answer.starts_with('Q'), "answer should be an original prompt");
            assert!(q.prompt.starts_with("Which question has this answer: "));
            assert_eq!(q.options.len(), 4);

            let note = q.reverse_note.as_deref().unwrap();
            assert!(q.prompt.contains(note));
        }
    }

    #[test]
    fn reverse_with_tiny_pool_uses_fewer_distractors() {
        let source = StaticSource::new()
            .with_category("Math", vec![raw("What is 2+2?", "4")])
            .with_category("Geography", vec![raw("Capital of France?", "Paris")]);
        let config = RoundConfig::mix().with_modifier(Modifier::Reverse);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        assert_eq!(round.len(), 2);
        for q in &round {
            assert_eq!(q.options.len(), 2);
        }
    }

    #[test]
    fn reverse_from_single_category_pools_everything() {
        let source = StaticSource::new()
            .with_category("Geography", numbered(2))
            .with_category("Math", numbered(2));
        let config = RoundConfig::new("Math")
            .with_count(5)
            .with_modifier(Modifier::Reverse);
        let round = build_round(&config, &source, &mut rng()).unwrap();
        // Both categories contribute despite the single selection.
        assert_eq!(round.len(), 4);
        assert!(round.iter().all(|q| q.category.is_some()));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn sample_size_and_uniqueness(pool_size in 1usize..60, count in 5usize..=30) {
                let source = StaticSource::new().with_category("Any", numbered(pool_size));
                let config = RoundConfig::new("Any").with_count(count);
                let round = build_round(&config, &source, &mut rng()).unwrap();

                prop_assert_eq!(round.len(), count.min(pool_size));

                let mut prompts: Vec<&str> = round.iter().map(|q| q.prompt.as_str()).collect();
                prompts.sort_unstable();
                let before = prompts.len();
                prompts.dedup();
                prop_assert_eq!(prompts.len(), before);
            }
        }
    }
}
