//! Ordered rule chain over [`HandFeatures`].
//!
//! Rules are not mutually exclusive; the first one that holds wins.

use log::{debug, warn};

use super::features::{HandFeatures, CIRCLE_MAX_DISTANCE};
use super::label::GestureLabel;
use super::landmarks::{Landmark, LandmarkSet};

type Rule = fn(&HandFeatures) -> bool;

/// Evaluation order. Changing it changes which sign wins on overlap.
const RULES: [(GestureLabel, Rule); 7] = [
    (GestureLabel::Hello, is_hello),
    (GestureLabel::Yes, is_yes),
    (GestureLabel::No, is_no),
    (GestureLabel::Thanks, is_thanks),
    (GestureLabel::Good, is_good),
    (GestureLabel::Please, is_please),
    (GestureLabel::Stop, is_stop),
];

fn is_hello(f: &HandFeatures) -> bool {
    f.index_up && f.lower_three_down()
}

fn is_yes(f: &HandFeatures) -> bool {
    f.thumb_up && f.four_fingers_folded() && f.thumb_forward
}

fn is_no(f: &HandFeatures) -> bool {
    f.index_up && f.index_horizontal && f.lower_three_down()
}

fn is_thanks(f: &HandFeatures) -> bool {
    f.four_fingers_up() && f.thumb_out
}

fn is_good(f: &HandFeatures) -> bool {
    f.thumb_index_distance < CIRCLE_MAX_DISTANCE && f.lower_three_up()
}

fn is_please(f: &HandFeatures) -> bool {
    f.index_above_knuckle && f.fingertips_together && f.palm_forward
}

fn is_stop(f: &HandFeatures) -> bool {
    f.four_fingers_up() && f.thumb_out && f.fingertips_spread
}

/// Stateless classifier; cheap to copy into worker threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct GestureClassifier;

impl GestureClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, set: &LandmarkSet) -> Option<GestureLabel> {
        let features = HandFeatures::extract(set);
        let detected = RULES
            .iter()
            .find(|(_, rule)| rule(&features))
            .map(|(label, _)| *label);

        debug!("Classified {:?} from {:?}", detected, features);
        detected
    }

    /// Classify raw tracker output. Anything that is not a clean 21-point
    /// skeleton classifies as no gesture.
    pub fn classify_points(&self, points: &[Landmark]) -> Option<GestureLabel> {
        match LandmarkSet::from_points(points) {
            Ok(set) => self.classify(&set),
            Err(e) => {
                warn!("⚠️ Dropping malformed hand: {}", e);
                None
            }
        }
    }

    /// Every rule that holds, in evaluation order.
    pub fn matching_rules(&self, set: &LandmarkSet) -> Vec<GestureLabel> {
        let features = HandFeatures::extract(set);
        RULES
            .iter()
            .filter(|(_, rule)| rule(&features))
            .map(|(label, _)| *label)
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::recognizer::landmarks::LANDMARK_COUNT;

    #[test]
    fn test_each_pose_classifies() {
        let classifier = GestureClassifier::new();
        assert_eq!(classifier.classify(&poses::hello()), Some(GestureLabel::Hello));
        assert_eq!(classifier.classify(&poses::yes()), Some(GestureLabel::Yes));
        assert_eq!(classifier.classify(&poses::thanks()), Some(GestureLabel::Thanks));
        assert_eq!(classifier.classify(&poses::good()), Some(GestureLabel::Good));
        assert_eq!(classifier.classify(&poses::please()), Some(GestureLabel::Please));
        assert_eq!(classifier.classify(&poses::fist()), None);
    }

    #[test]
    fn test_hello_wins_over_no() {
        let classifier = GestureClassifier::new();
        let pose = poses::no();
        assert_eq!(
            classifier.matching_rules(&pose),
            vec![GestureLabel::Hello, GestureLabel::No]
        );
        assert_eq!(classifier.classify(&pose), Some(GestureLabel::Hello));
    }

    #[test]
    fn test_thanks_shadows_stop() {
        let classifier = GestureClassifier::new();
        let pose = poses::stop();
        let matches = classifier.matching_rules(&pose);
        assert!(matches.contains(&GestureLabel::Stop));
        assert_eq!(matches[0], GestureLabel::Thanks);
        assert_eq!(classifier.classify(&pose), Some(GestureLabel::Thanks));
    }

    #[test]
    fn test_classify_matches_first_rule() {
        let classifier = GestureClassifier::new();
        for pose in [
            poses::hello(),
            poses::yes(),
            poses::no(),
            poses::thanks(),
            poses::good(),
            poses::please(),
            poses::stop(),
            poses::fist(),
        ] {
            assert_eq!(
                classifier.classify(&pose),
                classifier.matching_rules(&pose).first().copied()
            );
        }
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = GestureClassifier::new();
        let pose = poses::good();
        let first = classifier.classify(&pose);
        for _ in 0..10 {
            assert_eq!(classifier.classify(&pose), first);
        }
    }

    #[test]
    fn test_yes_needs_thumb_towards_camera() {
        let classifier = GestureClassifier::new();
        let mut points = *poses::yes().points();
        points[crate::recognizer::landmarks::THUMB_TIP].z = -0.05;
        assert_eq!(classifier.classify_points(&points), None);
    }

    #[test]
    fn test_circle_needs_distance_below_threshold() {
        use crate::recognizer::landmarks::{INDEX_TIP, THUMB_TIP};

        let classifier = GestureClassifier::new();
        let mut points = *poses::good().points();
        points[INDEX_TIP] = Landmark::new(0.0, 0.55, 0.0);
        points[THUMB_TIP] = Landmark::new(CIRCLE_MAX_DISTANCE, 0.55, 0.0);
        assert_eq!(classifier.classify_points(&points), None);

        points[THUMB_TIP].x = 0.0625;
        assert_eq!(classifier.classify_points(&points), Some(GestureLabel::Good));
    }

    #[test]
    fn test_malformed_input_fails_closed() {
        let classifier = GestureClassifier::new();
        let points = poses::hello().points().to_vec();
        assert_eq!(classifier.classify_points(&points[..LANDMARK_COUNT - 1]), None);
        assert_eq!(classifier.classify_points(&[]), None);

        let mut with_nan = points.clone();
        with_nan[0].x = f32::NAN;
        assert_eq!(classifier.classify_points(&with_nan), None);

        assert_eq!(classifier.classify_points(&points), Some(GestureLabel::Hello));
    }
}
