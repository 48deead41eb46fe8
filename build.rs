//! Build script for rig and clip table validation
//!
//! Runs at compile time: checks that the resting climber can actually reach its
//! grips and footholds, and that every shipped sprite clip table only names
//! known clips with a non-zero frame count.

// Include the shared skeleton constants
#[path = "src/skeleton_constants.rs"]
mod skeleton_constants;

use glam::Vec2;
use heck::ToKebabCase;
use serde::Deserialize;
use skeleton_constants::{
    rest_hip, rest_shoulder, LimbReach, CLIP_NAMES, FOOT, REST_FOOTHOLD, REST_GRIP,
};
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct ClipEntry {
    name: String,
    frames: u32,
}

#[derive(Debug, Deserialize)]
struct ClipTable {
    clips: Vec<ClipEntry>,
}

/// Names every clip table must provide, in any of their accepted spellings
const REQUIRED: [&[&str]; 5] = [
    &["idle", "idle-hang"],
    &["reach", "reach-left"],
    &["reach", "reach-right"],
    &["slip"],
    &["fall"],
];

/// Check the resting grips and footholds are inside limb reach
fn validate_rig() -> Vec<String> {
    let reach = LimbReach::from_default();
    let mut errors = Vec::new();

    let check = |errors: &mut Vec<String>, name: &str, root: Vec2, target: Vec2, max: f32| {
        let distance = root.distance(target);
        if distance > max {
            errors.push(format!(
                "  {}: target {:.3}m away, limb reaches {:.3}m",
                name, distance, max
            ));
        }
    };

    check(&mut errors, "Rest grip", rest_shoulder(), REST_GRIP, reach.arm);
    check(&mut errors, "Rest foothold", rest_hip(), REST_FOOTHOLD, reach.leg);
    // Ankle sits a foot length above the toe; the thigh and shin alone must reach it
    check(
        &mut errors,
        "Rest ankle",
        rest_hip(),
        REST_FOOTHOLD + Vec2::new(0.0, FOOT),
        reach.leg - FOOT,
    );

    errors
}

/// Validate a clip table file
fn validate_clip_table(path: &Path) -> Result<(), String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let table: ClipTable = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))?;

    let mut errors = Vec::new();
    for clip in &table.clips {
        if !CLIP_NAMES.contains(&clip.name.as_str()) {
            let kebab = clip.name.to_kebab_case();
            if CLIP_NAMES.contains(&kebab.as_str()) {
                errors.push(format!("  '{}' should be spelled '{}'", clip.name, kebab));
            } else {
                errors.push(format!("  unknown clip '{}'", clip.name));
            }
        }
        if clip.frames == 0 {
            errors.push(format!("  clip '{}' has no frames", clip.name));
        }
    }
    for spellings in REQUIRED {
        if !table.clips.iter().any(|c| spellings.contains(&c.name.as_str())) {
            errors.push(format!("  missing clip '{}'", spellings.join("' or '")));
        }
    }

    if errors.is_empty() {
        println!(
            "cargo:warning=✓ {} validated ({} clips)",
            path.display(),
            table.clips.len()
        );
        Ok(())
    } else {
        Err(format!(
            "Clip table {} is invalid:\n{}",
            path.display(),
            errors.join("\n")
        ))
    }
}

fn main() {
    // Rerun if shared constants change
    println!("cargo:rerun-if-changed=src/skeleton_constants.rs");

    let rig_errors = validate_rig();
    if !rig_errors.is_empty() {
        panic!("Rig validation failed!\n{}", rig_errors.join("\n"));
    }

    let clip_dir = Path::new("assets/clips");
    if !clip_dir.exists() {
        println!("cargo:warning=Clip table directory not found, skipping validation");
        return;
    }

    let mut has_errors = false;

    if let Ok(entries) = fs::read_dir(clip_dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                // Tell cargo to rerun if this file changes
                println!("cargo:rerun-if-changed={}", path.display());

                if let Err(e) = validate_clip_table(&path) {
                    println!("cargo:warning=VALIDATION ERROR: {}", e);
                    has_errors = true;
                }
            }
        }
    }

    if has_errors {
        panic!("Clip table validation failed! Fix the files under assets/clips.");
    }

    // Rerun if a table is added or removed
    println!("cargo:rerun-if-changed={}", clip_dir.display());
}
