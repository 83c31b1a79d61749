/*
 * SPDX-FileCopyrightText: 2025 Wavelens UG <info@wavelens.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

//! Tests for entity enums

use entity::action_data::ActionKind;
use entity::user::SystemRole;

#[test]
fn test_action_kind_tags() {
    assert_eq!(ActionKind::Python.tag(), "Python");
    assert_eq!(ActionKind::WindowsCmd.tag(), "WindowsCMD");
    assert_eq!(ActionKind::Link.tag(), "Link");
}

#[test]
fn test_action_kind_from_tag() {
    assert_eq!(ActionKind::from_tag("Python"), Some(ActionKind::Python));
    assert_eq!(
        ActionKind::from_tag("WindowsCMD"),
        Some(ActionKind::WindowsCmd)
    );
    assert_eq!(ActionKind::from_tag("Link"), Some(ActionKind::Link));

    assert_eq!(ActionKind::from_tag("Bash"), None);
    assert_eq!(ActionKind::from_tag("python"), None);
    assert_eq!(ActionKind::from_tag(""), None);
}

#[test]
fn test_action_kind_tag_round_trip() {
    for kind in [ActionKind::Python, ActionKind::WindowsCmd, ActionKind::Link] {
        assert_eq!(ActionKind::from_tag(kind.tag()), Some(kind));
    }
}

#[test]
fn test_system_role_tags() {
    assert_eq!(SystemRole::User.tag(), "User");
    assert_eq!(SystemRole::UserManager.tag(), "UserManager");
    assert_eq!(SystemRole::ActionManager.tag(), "ActionManager");
    assert_eq!(SystemRole::Admin.tag(), "Admin");
}

#[test]
fn test_system_role_from_tag() {
    assert_eq!(SystemRole::from_tag("Admin"), Some(SystemRole::Admin));
    assert_eq!(
        SystemRole::from_tag("UserManager"),
        Some(SystemRole::UserManager)
    );
    assert_eq!(SystemRole::from_tag("admin"), None);
    assert_eq!(SystemRole::from_tag("Moderator"), None);
}
