//! Integration tests for the full read -> edit -> write cycle over a realistic hosts file.

use hed_parser::hosts::grouping::split_groups;
use hed_parser::hosts::loader::{synthesize_text, HostsDocument};
use hed_parser::{classify, fold, render, synthesize, Host, Item, Line, SYSTEM_GROUP};

const FIXTURE: &str = include_str!("fixtures/hosts");

fn find<'a>(items: &'a mut [Item], ip: &str, group: &str) -> &'a mut Item {
    items
        .iter_mut()
        .find(|item| item.ip == ip && item.group == group)
        .unwrap_or_else(|| panic!("no item {ip} in {group}"))
}

#[test]
fn test_fixture_folds_into_items() {
    let items = fold(&classify(FIXTURE), None);

    let summary: Vec<(&str, &str, usize)> = items
        .iter()
        .map(|item| (item.group.as_str(), item.ip.as_str(), item.hosts.len()))
        .collect();
    assert_eq!(
        summary,
        vec![
            (SYSTEM_GROUP, "127.0.0.1", 1),
            (SYSTEM_GROUP, "::1", 1),
            (SYSTEM_GROUP, "1.1.1.1", 4),
            ("foo", "3.3.3.3", 1),
            ("foo", "4.4.4.4", 2),
        ]
    );

    let merged = &items[2].hosts;
    assert_eq!(
        merged,
        &vec![
            Host::enabled("a.com"),
            Host::enabled("b.com"),
            Host::disabled("c.com"),
            Host::enabled("e.com"),
        ]
    );
}

#[test]
fn test_edit_cycle_preserves_layout() {
    let lines = classify(FIXTURE);
    let mut items = fold(&lines, None);

    let system = find(&mut items, "1.1.1.1", SYSTEM_GROUP);
    system.hosts.pop();
    system.hosts.push(Host::enabled("o.com"));
    system.hosts.push(Host::disabled("13.com"));

    find(&mut items, "3.3.3.3", "foo")
        .hosts
        .push(Host::enabled("d.com"));

    items.push(Item::new(
        "2.2.2.2",
        vec![Host::enabled("foo.com"), Host::disabled("bar.com")],
        "staging",
    ));

    let text = render(&synthesize(&items, &lines));
    insta::assert_snapshot!(text, @r"
    # Hosts file managed by hed
    127.0.0.1 localhost
    ::1 localhost

    1.1.1.1 a.com b.com o.com
    # 1.1.1.1 c.com 13.com

    #[foo]
    3.3.3.3 x.com d.com

    # 4.4.4.4 y.com z.com
    #[foo]

    #[staging]
    2.2.2.2 foo.com
    # 2.2.2.2 bar.com
    #[staging]
    ");
    assert!(text.ends_with("#[staging]\n"));
}

#[test]
fn test_fixture_groups() {
    let groups = split_groups(FIXTURE);
    assert_eq!(groups.len(), 2);

    assert_eq!(groups[0].name, SYSTEM_GROUP);
    assert_eq!(groups[0].text, FIXTURE);
    assert_eq!(groups[0].list.len(), 5);

    let foo = &groups[1];
    assert_eq!(foo.name, "foo");
    assert_eq!(foo.text, "3.3.3.3 x.com\n# 4.4.4.4 y.com z.com # disabled");
    assert_eq!(foo.list.len(), 2);
}

#[test]
fn test_group_text_rewritten_in_isolation() {
    let groups = split_groups(FIXTURE);
    let foo = groups
        .iter()
        .find(|group| !group.is_system())
        .expect("fixture has a named group");

    let text = synthesize_text(&foo.list, &foo.text, Some(&foo.name));
    assert_eq!(text, "3.3.3.3 x.com\n\n# 4.4.4.4 y.com z.com\n");
}

#[test]
fn test_unedited_document_is_stable_after_one_write() {
    let doc = HostsDocument::from_string(FIXTURE);
    let once = doc.apply(&doc.items());
    let twice = once.apply(&once.items());
    assert_eq!(once.text(), twice.text());
    assert_eq!(twice.items(), once.items());
}

#[test]
fn test_reserved_marker_never_written() {
    let doc = HostsDocument::from_string(FIXTURE);
    let written = doc.apply(&doc.items());
    assert!(!written.text().contains("#[System]"));
    assert!(!written
        .lines()
        .iter()
        .any(|line| matches!(line, Line::GroupMarker { name } if name == SYSTEM_GROUP)));
}

#[test]
fn test_document_from_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("hosts");
    std::fs::write(&path, FIXTURE.replace('\n', "\r\n")).expect("write fixture");

    let doc = HostsDocument::from_path(&path).expect("fixture loads");
    assert_eq!(doc.lines(), classify(FIXTURE).as_slice());
    assert_eq!(doc.items(), fold(&classify(FIXTURE), None));
}
