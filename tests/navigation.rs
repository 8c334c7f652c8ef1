//! End-to-end navigation tests over the library API.
//!
//! These drive a [`StandardView`] through ingestion, clicks, dismissals,
//! and back/forward, and check the selection and history stack after each
//! step.

use anyhow::Result;
use competency_lens::source::parse_csv;
use competency_lens::view::StandardView;
use competency_lens::render::Renderer;
use competency_lens_core::context::RenderContext;
use competency_lens_core::locator::{parse_hash, Locator};
use competency_lens_core::models::FieldNames;
use competency_lens_core::navigation::{HistoryHost, SessionHistory};
use competency_lens_core::slug::slugify;

const CSV: &str = "\
Active (y/n),Lens,Lens_Description,Mastery,Competency
y,Technical,Craft,1,A
y,Leadership,Lead,1,B
n,Technical,Craft,2,C
y,Technical,Craft,2,D
y,Leadership,Lead,3,E
y,,No lens,2,F
";

#[derive(Default)]
struct Frames(Vec<(String, Option<u32>)>);

impl Renderer for Frames {
    fn render(&mut self, ctx: &RenderContext<'_>) -> Result<()> {
        self.0.push((
            ctx.active_lens.href.clone(),
            ctx.active_standard.map(|s| s.id),
        ));
        Ok(())
    }

    fn show_detail(&mut self, _ctx: &RenderContext<'_>) -> Result<()> {
        Ok(())
    }

    fn hide_detail(&mut self) -> Result<()> {
        Ok(())
    }
}

fn open(hash: &str) -> StandardView<Frames> {
    let mut view = StandardView::new(
        "All",
        FieldNames::default(),
        Box::new(SessionHistory::new(hash)),
        Frames::default(),
    );
    view.on_parse_complete(parse_csv(CSV).unwrap()).unwrap();
    view
}

fn selection(view: &StandardView<Frames>) -> (String, Option<u32>) {
    let loc = view.app().locator().unwrap();
    (loc.lens, loc.standard)
}

#[test]
fn test_ids_are_contiguous_over_accepted_rows() {
    let view = open("");
    let ids: Vec<u32> = view
        .app()
        .repository()
        .standards()
        .iter()
        .map(|s| s.id)
        .collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(
        view.app().repository().by_id(3).unwrap().field("Competency"),
        Some("D")
    );
}

#[test]
fn test_lens_without_name_still_listed_under_all() {
    let view = open("");
    let repo = view.app().repository();
    assert_eq!(repo.lenses().len(), 3);
    assert_eq!(repo.by_type_and_mastery(None, "2").len(), 2);
    assert_eq!(repo.by_type_and_mastery(Some("Technical"), "2").len(), 1);
}

#[test]
fn test_round_trip_every_lens_and_member() {
    let view = open("");
    let repo = view.app().repository();
    for lens in repo.lenses() {
        for level in ["1", "2", "3"] {
            for standard in repo.by_type_and_mastery(lens.filter.as_deref(), level) {
                let hash = Locator::for_selection(lens, Some(standard)).to_hash();
                let mut other = open(&hash);
                assert_eq!(selection(&other), (lens.href.clone(), Some(standard.id)));
                assert_eq!(parse_hash(&hash), Locator::new(lens.href.clone(), Some(standard.id)));
                // A fresh deep link renders exactly once.
                assert_eq!(other.render_count(), 1);
                other.render().unwrap();
            }
        }
    }
}

#[test]
fn test_full_navigation_story() {
    let mut view = open("#/");
    assert_eq!(selection(&view), ("all".to_string(), None));

    view.on_lens("Leadership").unwrap();
    view.on_show_detail(4).unwrap();
    assert_eq!(selection(&view), ("leadership".to_string(), Some(4)));
    assert_eq!(view.history().location_hash(), "#/leadership/4/");

    // Switching lens with the detail open keeps it open.
    view.on_lens("Technical").unwrap();
    assert_eq!(selection(&view), ("technical".to_string(), Some(4)));

    // User closes the panel: lens-only entry pushed.
    view.on_hide_detail().unwrap();
    assert_eq!(selection(&view), ("technical".to_string(), None));
    assert_eq!(view.history().location_hash(), "#/technical/");

    // Back twice: lens-only technical entry, then leadership + 4.
    let ev = view.history_mut().back().unwrap();
    view.pop_history(ev).unwrap();
    assert_eq!(selection(&view), ("technical".to_string(), None));

    let ev = view.history_mut().back().unwrap();
    view.pop_history(ev).unwrap();
    assert_eq!(selection(&view), ("leadership".to_string(), Some(4)));
    assert!(view.is_detail_open());

    // Forward replays without growing the stack.
    let ev = view.history_mut().forward().unwrap();
    view.pop_history(ev).unwrap();
    assert_eq!(selection(&view), ("technical".to_string(), None));
    assert!(!view.is_detail_open());
    assert_eq!(view.history().location_hash(), "#/technical/");
}

#[test]
fn test_frames_only_on_change() {
    let mut view = open("#/technical/");
    view.on_lens("Technical").unwrap();
    view.on_lens("Technical").unwrap();
    assert_eq!(view.render_count(), 1);
    view.on_show_detail(1).unwrap();
    view.on_show_detail(1).unwrap();
    assert_eq!(view.render_count(), 2);
}

#[test]
fn test_slug_properties() {
    for name in ["Technical", "Open & Honest Communication", "a -- b", "Ünïcode Lens"] {
        let s = slugify(name);
        assert_eq!(slugify(&s), s);
        assert!(s.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-'));
    }
}
