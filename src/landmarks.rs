//! Hand landmark data for a single camera frame
//!
//! A detector reports each visible hand as 21 ordered points in capture-frame
//! pixel space (MediaPipe hand model convention). Nothing here carries state
//! across frames: every `Hand` is built fresh per frame and thrown away.

use serde::{Deserialize, Serialize};

/// Number of landmarks reported per hand.
pub const LANDMARK_COUNT: usize = 21;

/// A single landmark position in capture-frame pixels.
///
/// `z` is relative depth as reported by the detector and is ignored by
/// every distance and predicate in this crate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }

    /// Euclidean distance in the image plane.
    pub fn distance_to(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Anatomical landmark indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandLandmark {
    Wrist,
    ThumbCmc,
    ThumbMcp,
    ThumbIp,
    ThumbTip,
    IndexMcp,
    IndexPip,
    IndexDip,
    IndexTip,
    MiddleMcp,
    MiddlePip,
    MiddleDip,
    MiddleTip,
    RingMcp,
    RingPip,
    RingDip,
    RingTip,
    PinkyMcp,
    PinkyPip,
    PinkyDip,
    PinkyTip,
}

impl HandLandmark {
    /// Position of this landmark in the detector's point list (0-20).
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// Errors raised while building a hand from detector output.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LandmarkError {
    #[error("Expected {expected} landmarks, got {actual}")]
    WrongCount { expected: usize, actual: usize },
}

/// One detected hand in one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Hand {
    points: [Point; LANDMARK_COUNT],
    /// "Left" or "Right" as labelled by the detector, if reported.
    pub handedness: Option<String>,
    /// Detection confidence (0.0-1.0).
    pub score: f32,
}

impl Hand {
    pub fn new(points: [Point; LANDMARK_COUNT]) -> Self {
        Self {
            points,
            handedness: None,
            score: 1.0,
        }
    }

    /// Build a hand from an ordered point list.
    ///
    /// The list must hold exactly [`LANDMARK_COUNT`] points.
    pub fn from_points(points: &[Point]) -> Result<Self, LandmarkError> {
        let points: [Point; LANDMARK_COUNT] =
            points.try_into().map_err(|_| LandmarkError::WrongCount {
                expected: LANDMARK_COUNT,
                actual: points.len(),
            })?;
        Ok(Self::new(points))
    }

    pub fn point(&self, landmark: HandLandmark) -> Point {
        self.points[landmark.index()]
    }

    pub fn index_tip(&self) -> Point {
        self.point(HandLandmark::IndexTip)
    }

    /// Vertical position of the palm reference point (the wrist).
    pub fn palm_y(&self) -> f32 {
        self.point(HandLandmark::Wrist).y
    }

    /// Distance between index and middle fingertips.
    ///
    /// Drives both keyboard "typing" and pointer "clicking".
    pub fn pinch_distance(&self) -> f32 {
        self.point(HandLandmark::IndexTip)
            .distance_to(&self.point(HandLandmark::MiddleTip))
    }

    /// A finger counts as extended when its tip is above its knuckle base.
    ///
    /// Image y grows downwards, so "above" means numerically smaller.
    pub fn is_finger_extended(&self, tip: HandLandmark, base: HandLandmark) -> bool {
        self.point(tip).y < self.point(base).y
    }

    /// Index and middle fingers both pointing up.
    pub fn is_palm_up(&self) -> bool {
        self.is_finger_extended(HandLandmark::IndexTip, HandLandmark::IndexMcp)
            && self.is_finger_extended(HandLandmark::MiddleTip, HandLandmark::MiddleMcp)
    }

    /// Middle and ring fingers both pointing up.
    pub fn is_scroll_pose(&self) -> bool {
        self.is_finger_extended(HandLandmark::MiddleTip, HandLandmark::MiddleMcp)
            && self.is_finger_extended(HandLandmark::RingTip, HandLandmark::RingMcp)
    }
}

/// Test helpers for building hands with specific landmark positions.
pub mod testing {
    use super::{Hand, HandLandmark, Point, LANDMARK_COUNT};

    /// Builder for hands used in tests.
    #[derive(Debug, Clone)]
    pub struct HandBuilder {
        points: [Point; LANDMARK_COUNT],
    }

    impl HandBuilder {
        /// Start from a neutral hand: wrist at `(x, y)`, every finger curled
        /// (tips level with their knuckle bases).
        pub fn at(x: f32, y: f32) -> Self {
            Self {
                points: [Point::new(x, y); LANDMARK_COUNT],
            }
        }

        pub fn set(mut self, landmark: HandLandmark, x: f32, y: f32) -> Self {
            self.points[landmark.index()] = Point::new(x, y);
            self
        }

        /// Put the index fingertip at `(x, y)` and the middle fingertip
        /// `gap` pixels to its right.
        pub fn pinch_at(self, x: f32, y: f32, gap: f32) -> Self {
            self.set(HandLandmark::IndexTip, x, y)
                .set(HandLandmark::MiddleTip, x + gap, y)
        }

        /// Raise a fingertip `by` pixels above its knuckle base.
        pub fn extend(mut self, tip: HandLandmark, base: HandLandmark, by: f32) -> Self {
            let base_point = self.points[base.index()];
            let tip_point = &mut self.points[tip.index()];
            tip_point.y = base_point.y - by;
            self
        }

        pub fn palm_up(self) -> Self {
            self.extend(HandLandmark::IndexTip, HandLandmark::IndexMcp, 40.0)
                .extend(HandLandmark::MiddleTip, HandLandmark::MiddleMcp, 40.0)
        }

        pub fn scroll_pose(self) -> Self {
            self.extend(HandLandmark::MiddleTip, HandLandmark::MiddleMcp, 40.0)
                .extend(HandLandmark::RingTip, HandLandmark::RingMcp, 40.0)
        }

        pub fn build(self) -> Hand {
            Hand::new(self.points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::HandBuilder;
    use super::*;

    #[test]
    fn test_landmark_indices_follow_detector_order() {
        assert_eq!(HandLandmark::Wrist.index(), 0);
        assert_eq!(HandLandmark::IndexMcp.index(), 5);
        assert_eq!(HandLandmark::IndexTip.index(), 8);
        assert_eq!(HandLandmark::MiddleMcp.index(), 9);
        assert_eq!(HandLandmark::MiddleTip.index(), 12);
        assert_eq!(HandLandmark::RingMcp.index(), 13);
        assert_eq!(HandLandmark::RingTip.index(), 16);
        assert_eq!(HandLandmark::PinkyTip.index(), 20);
    }

    #[test]
    fn test_distance_ignores_depth() {
        let a = Point { x: 0.0, y: 0.0, z: 5.0 };
        let b = Point { x: 3.0, y: 4.0, z: -2.0 };
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_from_points_rejects_wrong_count() {
        let points = vec![Point::default(); 10];
        assert_eq!(
            Hand::from_points(&points),
            Err(LandmarkError::WrongCount {
                expected: 21,
                actual: 10
            })
        );
    }

    #[test]
    fn test_pinch_distance() {
        let hand = HandBuilder::at(0.0, 0.0).pinch_at(100.0, 100.0, 10.0).build();
        assert!((hand.pinch_distance() - 10.0).abs() < 1e-6);
    }

    #[test]
    fn test_palm_up_requires_both_fingers() {
        let curled = HandBuilder::at(0.0, 400.0).build();
        assert!(!curled.is_palm_up());

        let index_only = HandBuilder::at(0.0, 400.0)
            .extend(HandLandmark::IndexTip, HandLandmark::IndexMcp, 30.0)
            .build();
        assert!(!index_only.is_palm_up());

        let both = HandBuilder::at(0.0, 400.0).palm_up().build();
        assert!(both.is_palm_up());
    }

    #[test]
    fn test_scroll_pose() {
        let hand = HandBuilder::at(0.0, 400.0).scroll_pose().build();
        assert!(hand.is_scroll_pose());
        assert!(!hand.is_palm_up());
    }

    #[test]
    fn test_palm_y_reads_wrist() {
        let hand = HandBuilder::at(10.0, 280.0).build();
        assert_eq!(hand.palm_y(), 280.0);
    }
}
