use kondate_core::{
    aggregate_week, normalize_lines, resolve_week, step, CalendarDate, InMemoryMemoRepository,
    MemoService, PlannerEvent, SessionState,
};

fn date(raw: &str) -> CalendarDate {
    CalendarDate::parse_key(raw).unwrap()
}

#[test]
fn scenario_week_dedups_shopping_and_exports_menus_in_order() {
    let window = resolve_week(date("2024-01-07"));
    assert_eq!(window.start(), date("2024-01-07"));
    assert_eq!(window.end(), date("2024-01-13"));

    let mut memos = MemoService::new(InMemoryMemoRepository::new());
    memos.save(date("2024-01-08"), "Soup", "milk\nbread");
    memos.save(date("2024-01-09"), "Rice", "milk");

    let summary = aggregate_week(&window, &memos);

    let items = summary
        .shopping
        .entries()
        .iter()
        .map(|entry| (entry.item.as_str(), entry.is_recurring()))
        .collect::<Vec<_>>();
    assert_eq!(items, vec![("milk", true), ("bread", false)]);
    assert_eq!(
        summary.shopping.days_for("milk"),
        Some(&[date("2024-01-08"), date("2024-01-09")][..])
    );
    assert_eq!(
        summary.shopping.days_for("bread"),
        Some(&[date("2024-01-08")][..])
    );

    assert_eq!(
        summary.menu_export,
        "1/8(月)\n・Soup\n\n1/9(火)\n・Rice\n\n"
    );
    let soup = summary.menu_export.find("Soup").unwrap();
    let rice = summary.menu_export.find("Rice").unwrap();
    assert!(soup < rice);
    assert_eq!(summary.shopping.export(), "milk\nbread\n");
}

#[test]
fn unfilled_days_are_listed_but_not_exported() {
    let window = resolve_week(date("2024-01-07"));
    let mut memos = MemoService::new(InMemoryMemoRepository::new());
    memos.save(date("2024-01-11"), "  \n", "tofu");

    let summary = aggregate_week(&window, &memos);
    assert_eq!(summary.menu_export, "");
    assert_eq!(summary.menu_days.len(), 7);
    assert!(summary.menu_days.iter().all(|day| day.menu.is_none()));
    assert_eq!(summary.shopping.len(), 1);
}

#[test]
fn item_text_matches_exactly() {
    let window = resolve_week(date("2024-01-07"));
    let mut memos = MemoService::new(InMemoryMemoRepository::new());
    memos.save(date("2024-01-07"), "", "Milk");
    memos.save(date("2024-01-08"), "", "milk");

    let summary = aggregate_week(&window, &memos);
    assert_eq!(summary.shopping.len(), 2);
    assert!(summary.shopping.entries().iter().all(|entry| !entry.is_recurring()));
}

#[test]
fn normalize_is_idempotent_on_mixed_input() {
    let samples = [
        "",
        "  \n\n ",
        "a\nb",
        "・a\n  ・・b  \n\n",
        "\r\n curry \r\n",
        "tofu・natto",
    ];
    for sample in samples {
        let once = normalize_lines(sample);
        assert_eq!(normalize_lines(&once), once, "sample {sample:?}");
        assert!(once.lines().all(|line| line.starts_with('・')));
    }
}

#[test]
fn session_flow_drives_sidebar_summary() {
    let state = SessionState::new(date("2024-01-10"));
    let events = vec![
        PlannerEvent::SelectDay(date("2024-01-08")),
        PlannerEvent::EditMenu("Soup".to_string()),
        PlannerEvent::EditShopping("milk\nbread".to_string()),
        PlannerEvent::Save,
        PlannerEvent::SelectDay(date("2024-01-09")),
        PlannerEvent::EditMenu("Rice".to_string()),
        PlannerEvent::EditShopping("milk".to_string()),
        PlannerEvent::Save,
    ];

    let mut state = state;
    let mut view = state.render();
    for event in events {
        (state, view) = step(state, event);
    }

    assert_eq!(view.flash.as_deref(), Some("2024-01-09 の内容を保存しました。"));
    let recurring = view
        .sidebar
        .shopping
        .iter()
        .map(|line| (line.item.as_str(), line.recurring))
        .collect::<Vec<_>>();
    assert_eq!(recurring, vec![("milk", true), ("bread", false)]);
    assert!(view.sidebar.menu_button.payload.contains("・Soup"));

    let (_, view) = step(state, PlannerEvent::PickDate(date("2024-01-15")));
    assert_eq!(view.week_start, date("2024-01-14"));
    assert!(view.sidebar.shopping.is_empty());
    assert_eq!(view.menu_input, "");
}
