pub mod id;
pub mod pose;
pub mod clip;
pub mod sheet;

pub use id::*;
pub use pose::*;
pub use clip::*;
pub use sheet::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_ids_are_indexable() {
        for (i, id) in ClipId::ALL.iter().enumerate() {
            assert_eq!(id.index(), i);
        }
    }

    #[test]
    fn test_clip_names_round_trip_per_naming() {
        for naming in [ClipNaming::Procedural, ClipNaming::Sprite] {
            for id in ClipId::ALL {
                let name = id.name(naming);
                assert!(
                    ClipId::from_name(name).contains(&id),
                    "{} should resolve back to {:?}",
                    name,
                    id
                );
            }
        }
    }

    #[test]
    fn test_reach_name_covers_both_sides() {
        assert_eq!(ClipId::from_name("reach"), &[ClipId::ReachLeft, ClipId::ReachRight]);
        assert!(ClipId::from_name("wave").is_empty());
    }

    #[test]
    fn test_only_slip_has_follow_up() {
        assert_eq!(ClipId::Slip.follow_up(), Some(ClipId::Fall));
        assert_eq!(ClipId::Fall.follow_up(), None);
        assert_eq!(ClipId::ReachLeft.follow_up(), None);
    }

    #[test]
    fn test_side_codes() {
        assert_eq!(Side::from_code(0), Some(Side::Left));
        assert_eq!(Side::from_code(1), Some(Side::Right));
        assert_eq!(Side::from_code(7), None);
        assert_eq!(Side::Left.opposite(), Side::Right);
    }
}
