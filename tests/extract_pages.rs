// tests/extract_pages.rs
use std::sync::Arc;

use chrono::{NaiveDate, NaiveDateTime};

use campus_hours::specs::library::{ServiceStatus, service_summary};
use campus_hours::{
    Catalog, CatalogMatcher, ChangeType, EngineOptions, MarkupShape, ScheduleStore, StaticScheduleTable,
    StatusResolver, WindowSource, extract,
};

const DINING: &str = r#"<!DOCTYPE html>
<html><head><title>Dining Hours</title></head>
<body>
<!-- <tr><td>Ghost Hall</td><td>1am-2am</td><td>1am-2am</td><td>1am-2am</td></tr> -->
<table class="hours-table">
  <thead><tr><th></th><th>Location</th><th>Breakfast</th><th>Lunch</th><th>Dinner</th><th>Late Night</th></tr></thead>
  <tbody>
    <tr><td><img src="/i/plate.png" alt=""></td><td><a href="/bp">Bruin Plate</a></td>
        <td>7:00 a.m. - 9:00 a.m.</td><td>11:00 a.m. - 2:00 p.m.</td><td>5:00 p.m. - 8:00 p.m.</td><td>Closed</td></tr>
    <tr><td><img src="/i/neve.png" alt=""></td><td>De&nbsp;Neve Residential Restaurant</td>
        <td>Closed</td><td>Closed</td><td>Closed</td><td>Closed</td></tr>
    <tr><td><img src="/i/1919.png" alt=""></td><td>CAF&Eacute; 1919</td>
        <td></td><td>11am&ndash;4pm</td><td>5pm&ndash;9pm</td><td>9pm&ndash;12am</td></tr>
    <tr><td></td><td>Rendezvous</td><td>Hours vary</td><td>Hours vary</td><td>Hours vary</td><td>Hours vary</td></tr>
    <tr><td></td><td>Pop-up Kitchen</td><td>Closed</td><td>noon - 2pm</td><td>Closed</td><td>Closed</td></tr>
  </tbody>
</table>
</body></html>"#;

const LIBRARIES: &str = r#"
<div class="s-lc-whw-cont">
<table class="table s-lc-whw">
 <thead>
  <tr><th>Location</th>
      <th>Sun<br/>Sep 21</th><th>Mon<br/>Sep 22</th><th>Tue<br/>Sep 23</th><th>Wed<br/>Sep 24</th></tr>
 </thead>
 <tbody>
  <tr class="s-lc-whw-loc">
    <td><span class="s-lc-whw-locname">Powell Library</span></td>
    <td>1pm - 10pm</td><td>7:30am - 12am</td><td>7:30am - 12am</td><td>7:30am - 12am</td>
  </tr>
  <tr class="s-lc-whw-subloc">
    <td><span class="s-lc-whw-sublocname">Night Powell</span></td>
    <td>-</td><td>12am - 7:30am</td><td>12am - 7:30am</td><td>12am - 7:30am</td>
  </tr>
  <tr class="s-lc-whw-subloc">
    <td><span class="s-lc-whw-sublocname">CLICC Classroom Hub</span></td>
    <td>-</td><td>8am - 5pm</td><td>8am - 5pm</td><td>8am - 5pm</td>
  </tr>
  <tr class="s-lc-whw-loc">
    <td><span class="s-lc-whw-locname">Arts Library</span></td>
    <td>-</td><td>9am - 5pm</td><td>-</td><td>9am - 5pm</td>
  </tr>
 </tbody>
</table>
</div>"#;

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 23).unwrap()
}

fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, 0).unwrap()
}

fn store_with(pages: &[&str]) -> ScheduleStore {
    let mut store = ScheduleStore::new(Arc::new(StaticScheduleTable::builtin()));
    let matcher = CatalogMatcher::new(&Catalog::builtin());
    for page in pages {
        store.ingest(&extract(page, day()), &matcher);
    }
    store
}

#[test]
fn dining_grid_keys() {
    let ex = extract(DINING, day());
    assert_eq!(ex.shape, Some(MarkupShape::Tabular));

    let keys: Vec<&str> = ex.entries.keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        vec!["bruinplate", "cafe1919", "deneveresidentialrestaurant", "popupkitchen", "rendezvous"]
    );
    assert_eq!(ex.get("bruinplate").unwrap().len(), 4);
}

#[test]
fn dining_grid_through_store() {
    let store = store_with(&[DINING]);

    let plate = store.windows_for("BruinPlate", day());
    let labels: Vec<_> = plate.windows.iter().map(|w| w.label.as_deref().unwrap_or("")).collect();
    assert_eq!(labels, vec!["Breakfast", "Lunch", "Dinner"]);
    assert_eq!(plate.windows[2].end, at(20, 0));

    // every meal closed: closed all day, not the static fallback
    assert!(store.windows_for("DeNeveDining", day()).is_closed_all_day());

    // unreadable text everywhere: static table
    assert_eq!(store.windows_for("Rendezvous", day()).windows.len(), 2);

    let cafe = store.windows_for("Cafe1919", day());
    assert_eq!(cafe.windows.len(), 3);
    assert_eq!(cafe.windows[2].end, day().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap());

    // entity not on the page at all
    assert_eq!(store.windows_for("TheDrey", day()).windows.len(), 2);
}

#[test]
fn dining_status_uses_page_hours() {
    let r = StatusResolver::new(store_with(&[DINING]), EngineOptions::default());

    // page closes dinner at 8, static table says 9
    let st = r.status_now("BruinPlate", at(20, 30));
    assert!(!st.open_now);
    assert_eq!(st.next_change_at, Some(day().succ_opt().unwrap().and_hms_opt(7, 0, 0).unwrap()));

    let st = r.status_now("Cafe1919", at(22, 0));
    assert!(st.open_now);
    assert_eq!(st.current_label.as_deref(), Some("Late Night"));
}

#[test]
fn library_page_through_resolver() {
    let ex = extract(LIBRARIES, day());
    assert_eq!(ex.shape, Some(MarkupShape::LocationBlock));

    let r = StatusResolver::new(store_with(&[LIBRARIES]), EngineOptions::default());

    let st = r.status_now("powell", at(8, 0));
    assert!(st.open_now);
    assert_eq!(st.current_label.as_deref(), Some("Hours"));

    // "-" today; later days were not ingested and the static table has no arts row
    let st = r.status_now("arts", at(12, 0));
    assert!(!st.open_now);
    assert_eq!(st.next_change_at, None);
    assert_eq!(st.next_change_type, None);
}

#[test]
fn powell_services() {
    let store = store_with(&[LIBRARIES]);
    let summary = service_summary(
        store.extracted("powell", day()),
        &["Night Powell", "CLICC Classroom Hub", "Equipment Lending"],
    );
    let got: Vec<(&str, Option<&str>, ServiceStatus)> =
        summary.iter().map(|s| (s.name.as_str(), s.hours.as_deref(), s.status)).collect();
    assert_eq!(
        got,
        vec![
            ("Night Powell", Some("00:00-07:30"), ServiceStatus::Open),
            ("CLICC Classroom Hub", Some("08:00-17:00"), ServiceStatus::Open),
            ("Equipment Lending", None, ServiceStatus::Closed),
        ]
    );
}

#[test]
fn both_pages_together() {
    let r = StatusResolver::new(store_with(&[DINING, LIBRARIES]), EngineOptions::default().with_meal_switch(true));
    let all = r.status_all(["BruinPlate", "powell", "Cafe1919"], at(21, 0));
    assert!(!all[0].open_now);
    assert!(all[1].open_now);
    // dinner ends where late night starts
    assert!(all[2].open_now);
    assert_eq!(all[2].current_label.as_deref(), Some("Dinner"));
    assert_eq!(all[2].next_change_type, Some(ChangeType::MealSwitch));
}
