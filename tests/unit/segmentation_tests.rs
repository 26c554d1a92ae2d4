/*!
 * Tests for the segmentation engine, including randomized property checks
 */

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use subcue::app_config::SegmentationConfig;
use subcue::boundary::{EntityDictionary, PunctuationProvider, RuleBasedProvider, Sentence};
use subcue::segmentation::{correct_overlaps, segment, segment_words};
use subcue::{Cue, Timecode, Word};
use crate::common;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyz";

/// Random transcript: ordered starts, occasional overlaps, commas, capitals and sentence ends
fn random_words(rng: &mut StdRng, count: usize) -> Vec<Word> {
    let mut words = Vec::with_capacity(count);
    let mut start = 0u64;
    for _ in 0..count {
        let len = rng.random_range(1..=14);
        let mut text: String = (0..len)
            .map(|_| LETTERS[rng.random_range(0..LETTERS.len())] as char)
            .collect();
        if rng.random_bool(0.15) {
            text = text[..1].to_uppercase() + &text[1..];
        }
        match rng.random_range(0..20) {
            0..=2 => text.push(','),
            3 | 4 => text.push('.'),
            5 => text.push('?'),
            _ => {}
        }

        let duration = rng.random_range(0..900);
        let end = start + duration;
        words.push(Word::new(text, Timecode::from_millis(start), Timecode::from_millis(end)));
        start += rng.random_range(0..700);
    }
    words
}

fn reconstructed(cues: &[Cue]) -> String {
    cues.iter()
        .flat_map(|c| c.lines.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ")
}

fn assert_ordered_without_overlap(cues: &[Cue]) {
    for cue in cues {
        assert!(cue.start <= cue.end, "cue ends before it starts: {:?}", cue);
    }
    for pair in cues.windows(2) {
        assert!(pair[0].start <= pair[1].start, "cues out of order: {:?}", pair);
        assert!(pair[0].end <= pair[1].start, "cues overlap: {:?}", pair);
    }
}

/// Reconstruction, line bounds and non-overlap over random transcripts
#[test]
fn test_segment_withRandomTranscripts_shouldKeepInvariants() {
    let mut rng = StdRng::seed_from_u64(0x5EED);

    for round in 0..60 {
        let count = rng.random_range(1..120);
        let words = random_words(&mut rng, count);
        let config = SegmentationConfig {
            max_width: rng.random_range(8..50),
            max_lines: round % 3 + 1,
            punctuation_only: rng.random_bool(0.3),
            comma_split_threshold: rng.random_range(1..10),
        };

        let provider = RuleBasedProvider::new("en", EntityDictionary::default()).unwrap();
        let cues = segment_words(&words, &provider, &config).unwrap();

        let expected = words.iter().map(|w| w.text.as_str()).collect::<Vec<_>>().join(" ");
        assert_eq!(reconstructed(&cues), expected, "round {}", round);

        for cue in &cues {
            let word_count: usize = cue.lines.iter().map(|l| l.split(' ').count()).sum();
            if word_count > 1 {
                assert!(cue.lines.len() <= config.max_lines, "too many lines in {:?}", cue);
            }
            for line in &cue.lines {
                let fits = line.chars().count() <= config.max_width;
                assert!(fits || !line.contains(' '), "line too wide: {:?}", line);
            }
        }

        assert_ordered_without_overlap(&cues);
    }
}

/// Short sentences are never split on a comma, long ones always are
#[test]
fn test_segment_clauseThreshold_shouldGateCommaSplits() {
    let mut rng = StdRng::seed_from_u64(7);
    let config = SegmentationConfig {
        max_width: 500,
        max_lines: 3,
        ..SegmentationConfig::default()
    };

    for _ in 0..40 {
        let len = rng.random_range(2..=16);
        let words = common::timed_words(&vec!["word"; len].join(" "), 0);
        let comma = rng.random_range(0..len - 1);
        let sentence = Sentence::new(words).with_clause_candidates(vec![comma]);

        let cues = segment(&[sentence], &config).unwrap();
        if len <= 7 {
            assert_eq!(cues.len(), 1, "{} words split on a comma", len);
        } else {
            assert!(cues.len() >= 2, "{} words not split on the comma", len);
        }
    }
}

/// The split point is the comma closest to the middle
#[test]
fn test_segment_shouldBalanceClauseSplit() {
    let words = common::timed_words(
        "So, after we installed the toolchain, we opened the editor, and then we wrote code.",
        0,
    );
    let provider = RuleBasedProvider::new("en", EntityDictionary::default()).unwrap();
    let cues = segment_words(&words, &provider, &SegmentationConfig::default()).unwrap();

    let texts: Vec<String> = cues.iter().map(|c| c.text()).collect();
    assert_eq!(
        texts,
        vec!["So, after we installed the toolchain,", "we opened the editor,", "and then we wrote code."]
    );
}

/// Entities from the dictionary are never cut by the line limit
#[test]
fn test_segment_lineSplit_shouldKeepEntitiesTogether() {
    let words = common::timed_words("today we visit the Musée National des Beaux Arts together", 0);
    let dictionary = EntityDictionary::new(["Musée National des Beaux Arts"]);
    let provider = PunctuationProvider::new(dictionary);
    let config = SegmentationConfig {
        max_width: 40,
        max_lines: 1,
        ..SegmentationConfig::default()
    };

    let cues = segment_words(&words, &provider, &config).unwrap();
    assert!(
        cues.iter().any(|c| c.text().contains("Musée National des Beaux Arts")),
        "entity was split: {:?}",
        cues
    );
}

/// Punctuation-only mode over a French sentence keeps the comma inside one cue
#[test]
fn test_segment_punctuationOnlyFrench_shouldNotSplitClauses() {
    let words = common::timed_words(
        "Après le déjeuner, nous reprendrons la présentation du projet.",
        0,
    );
    let provider = RuleBasedProvider::new("fr", EntityDictionary::default()).unwrap();
    let config = SegmentationConfig {
        punctuation_only: true,
        ..SegmentationConfig::default()
    };

    let cues = segment_words(&words, &provider, &config).unwrap();
    assert_eq!(cues.len(), 1);
    assert_eq!(
        cues[0].lines,
        vec!["Après le déjeuner, nous reprendrons la", "présentation du projet."]
    );
}

/// Overlap correction only ever shortens the earlier cue
#[test]
fn test_correct_overlaps_shouldClampToNextStart() {
    let mut cues = vec![
        Cue::new(vec!["a".into()], Timecode::from_millis(0), Timecode::from_millis(1_200)),
        Cue::new(vec!["b".into()], Timecode::from_millis(1_000), Timecode::from_millis(1_500)),
        Cue::new(vec!["c".into()], Timecode::from_millis(2_000), Timecode::from_millis(2_500)),
    ];

    assert_eq!(correct_overlaps(&mut cues), 1);
    assert_eq!(cues[0].end, Timecode::from_millis(1_000));
    assert_eq!(cues[1].end, Timecode::from_millis(1_500));
    assert_ordered_without_overlap(&cues);
}
