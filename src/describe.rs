// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license
//! 场景描述生成 (Description Generator)
//!
//! 纯函数: 相同输入 → 相同输出, 按模型类别生成自然语言摘要。

use phf::phf_map;

use crate::detection::types::{DetectionSet, HandDetection, ObjectDetection, PoseDetection};

pub const NO_OBJECTS: &str = "No objects detected.";
pub const NO_PEOPLE: &str = "No people detected.";
pub const NO_HANDS: &str = "No hands detected.";

const TRAFFIC_SCENE: &str = "This looks like a street or traffic scene.";
const PEOPLE_WITH_ANIMALS: &str = "People are here with animals.";
const CROWDED_AREA: &str = "This appears to be a crowded area.";

const HAND_RAISED: &str = "Their hand is raised.";
const FULL_BODY: &str = "Full body is visible.";
const UPPER_BODY: &str = "Upper body is visible.";
const PARTIAL_POSE: &str = "Partial pose detected.";
const MULTIPLE_POSES: &str = "Multiple poses are being tracked.";

const VEHICLES: [&str; 5] = ["car", "truck", "bus", "motorcycle", "bicycle"];
const ANIMALS: [&str; 6] = ["dog", "cat", "bird", "horse", "cow", "sheep"];

/// 不规则复数
static IRREGULAR_PLURALS: phf::Map<&'static str, &'static str> = phf_map! {
    "person" => "people",
    "mouse" => "mice",
    "knife" => "knives",
};

/// 生成当前检测集合的描述
///
/// `threshold` 仅用于姿态关键点的可见性判定
pub fn describe(set: &DetectionSet, threshold: f32) -> String {
    match set {
        DetectionSet::Object(objects) => describe_objects(objects),
        DetectionSet::Pose(poses) => describe_poses(poses, threshold),
        DetectionSet::Hand(hands) => describe_hands(hands),
    }
}

/// 空集合时的占位文字
pub fn placeholder(set: &DetectionSet) -> &'static str {
    match set {
        DetectionSet::Object(_) => NO_OBJECTS,
        DetectionSet::Pose(_) => NO_PEOPLE,
        DetectionSet::Hand(_) => NO_HANDS,
    }
}

/// 单词复数化, count <= 1 时原样返回
pub fn pluralize(word: &str, count: usize) -> String {
    if count <= 1 {
        return word.to_string();
    }
    if let Some(irregular) = IRREGULAR_PLURALS.get(word) {
        return irregular.to_string();
    }
    if word.ends_with('s') || word.ends_with('x') || word.ends_with("ch") || word.ends_with("sh") {
        return format!("{}es", word);
    }
    if let Some(stem) = word.strip_suffix('y') {
        let consonant_before = stem
            .chars()
            .last()
            .map(|c| !"aeiou".contains(c.to_ascii_lowercase()))
            .unwrap_or(false);
        if consonant_before {
            return format!("{}ies", stem);
        }
    }
    format!("{}s", word)
}

/// 列表连接: "X" / "X and Y" / "X, Y, and Z"
pub fn join_items(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{} and {}", first, second),
        [rest @ .., last] => format!("{}, and {}", rest.join(", "), last),
    }
}

/// 按类别计数, 按数量降序 (数量相同保持首次出现顺序)
pub fn class_counts(objects: &[ObjectDetection]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for object in objects {
        match counts.iter_mut().find(|(class, _)| *class == object.class) {
            Some((_, n)) => *n += 1,
            None => counts.push((object.class.clone(), 1)),
        }
    }
    // sort_by 是稳定排序
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

fn describe_objects(objects: &[ObjectDetection]) -> String {
    if objects.is_empty() {
        return NO_OBJECTS.to_string();
    }

    let counts = class_counts(objects);
    let items: Vec<String> = counts
        .iter()
        .map(|(class, n)| format!("{} {}", n, pluralize(class, *n)))
        .collect();
    let mut text = format!("The scene contains {}.", join_items(&items));

    let count_of = |name: &str| {
        counts
            .iter()
            .find(|(class, _)| class == name)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    };
    let people = count_of("person");
    let has_any = |names: &[&str]| names.iter().any(|name| count_of(name) > 0);

    let context = if people > 0 && has_any(&VEHICLES) {
        Some(TRAFFIC_SCENE)
    } else if people > 0 && has_any(&ANIMALS) {
        Some(PEOPLE_WITH_ANIMALS)
    } else if people > 3 {
        Some(CROWDED_AREA)
    } else {
        None
    };
    if let Some(sentence) = context {
        text.push(' ');
        text.push_str(sentence);
    }
    text
}

fn describe_poses(poses: &[PoseDetection], threshold: f32) -> String {
    if poses.is_empty() {
        return NO_PEOPLE.to_string();
    }

    let mut text = if poses.len() == 1 {
        "1 person detected. ".to_string()
    } else {
        format!("{} people detected. ", poses.len())
    };

    match poses {
        [pose] => {
            let visible = pose.visible_count(threshold);
            let sentence = if pose.hand_raised(threshold) {
                HAND_RAISED
            } else if visible > 14 {
                FULL_BODY
            } else if visible > 8 {
                UPPER_BODY
            } else {
                PARTIAL_POSE
            };
            text.push_str(sentence);
        }
        _ => text.push_str(MULTIPLE_POSES),
    }
    text
}

fn describe_hands(hands: &[HandDetection]) -> String {
    match hands {
        [] => NO_HANDS.to_string(),
        [hand] => format!("1 {} hand detected, all 21 landmarks.", hand.handedness),
        [first, second] => format!(
            "2 hands detected ({} and {}), both tracked fully.",
            first.handedness, second.handedness
        ),
        _ => format!("{} hands detected and tracked.", hands.len()),
    }
}
