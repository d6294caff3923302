use super::*;

// =============================================================
// Edge roles
// =============================================================

#[test]
fn x_roles_match_handle_sets() {
    for corner in [Corner::Tl, Corner::Ml, Corner::Bl] {
        assert_eq!(corner.x_role(), EdgeRole::Start, "{corner}");
    }
    for corner in [Corner::Tr, Corner::Mr, Corner::Br] {
        assert_eq!(corner.x_role(), EdgeRole::End, "{corner}");
    }
    for corner in [Corner::Mt, Corner::Mb] {
        assert_eq!(corner.x_role(), EdgeRole::None, "{corner}");
    }
}

#[test]
fn y_roles_match_handle_sets() {
    for corner in [Corner::Tl, Corner::Mt, Corner::Tr] {
        assert_eq!(corner.y_role(), EdgeRole::Start, "{corner}");
    }
    for corner in [Corner::Bl, Corner::Mb, Corner::Br] {
        assert_eq!(corner.y_role(), EdgeRole::End, "{corner}");
    }
    for corner in [Corner::Ml, Corner::Mr] {
        assert_eq!(corner.y_role(), EdgeRole::None, "{corner}");
    }
}

#[test]
fn every_handle_resizes_at_least_one_axis() {
    for corner in Corner::ALL {
        assert!(
            corner.x_role() != EdgeRole::None || corner.y_role() != EdgeRole::None,
            "{corner} resizes nothing"
        );
    }
}

#[test]
fn opposite_flips_both_roles() {
    let flip = |role: EdgeRole| match role {
        EdgeRole::Start => EdgeRole::End,
        EdgeRole::End => EdgeRole::Start,
        EdgeRole::None => EdgeRole::None,
    };
    for corner in Corner::ALL {
        let opposite = corner.opposite();
        assert_eq!(opposite.x_role(), flip(corner.x_role()), "{corner}");
        assert_eq!(opposite.y_role(), flip(corner.y_role()), "{corner}");
        assert_eq!(opposite.opposite(), corner);
    }
}

// =============================================================
// Parsing and serde
// =============================================================

#[test]
fn parse_round_trips_every_id() {
    for corner in Corner::ALL {
        let parsed: Corner = corner.as_str().parse().unwrap();
        assert_eq!(parsed, corner);
        assert_eq!(corner.to_string(), corner.as_str());
    }
}

#[test]
fn parse_rejects_unknown_ids() {
    let err = "mtr".parse::<Corner>().unwrap_err();
    assert_eq!(err, ParseCornerError("mtr".to_owned()));
    assert!(err.to_string().contains("mtr"));
    assert!("TL".parse::<Corner>().is_err());
    assert!("".parse::<Corner>().is_err());
}

#[test]
fn serde_uses_lowercase_ids() {
    assert_eq!(serde_json::to_string(&Corner::Br).unwrap(), "\"br\"");
    let corner: Corner = serde_json::from_str("\"ml\"").unwrap();
    assert_eq!(corner, Corner::Ml);
    assert!(serde_json::from_str::<Corner>("\"xx\"").is_err());
}
