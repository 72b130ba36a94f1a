use pager::{GotoOutcome, NavItem, NavTarget, PageLinkBuilder, Pager, PagerGroup, PagerSnapshot};

struct TopicRoute;

impl PageLinkBuilder for TopicRoute {
    fn page_url(&self, page: u64) -> String {
        if page > 1 {
            format!("/forum/topics?p={page}")
        } else {
            "/forum/topics".to_string()
        }
    }
}

#[test]
fn full_request_lifecycle() -> anyhow::Result<()> {
    // request 1: fresh state, URL carries p=3
    let mut pager = Pager::restore(&PagerSnapshot::default())?;
    pager.set_count(95);
    pager.initialize_from_request(Some("3"))?;
    assert_eq!(pager.current_page_index(), 2);
    assert_eq!(pager.skip_index(), 40);

    let items: Vec<_> = pager.nav_items().collect();
    assert_eq!(items.first(), Some(&NavItem::Prev { target: 2 }));
    assert!(items.contains(&NavItem::Current { number: 3 }));

    // state written back at the end of the request
    let saved = pager.snapshot();

    // request 2: goto form submits page 5; the stale p=3 in the URL loses
    let mut pager = Pager::restore(&saved)?;
    pager.set_count(95);
    let mut notified = 0;
    assert_eq!(
        pager.goto_page(5, || notified += 1),
        GotoOutcome::Accepted { page_index: 4 }
    );
    pager.initialize_from_request(Some("3"))?;
    assert_eq!(pager.current_page_index(), 4);
    assert_eq!(notified, 1);
    Ok(())
}

#[test]
fn link_transport_renders_urls_for_every_interactive_item() {
    let mut pager = Pager::new();
    pager.set_count(500);
    pager.set_current_page_index(10);
    pager.set_use_postback(false);

    for item in pager.nav_items() {
        match item.target_page() {
            Some(page) => {
                let target = pager.link_target(&TopicRoute, page);
                let expected = if page > 1 {
                    format!("/forum/topics?p={page}")
                } else {
                    "/forum/topics".to_string()
                };
                assert_eq!(target, NavTarget::Href { url: expected });
            }
            None => assert!(matches!(item, NavItem::Current { .. })),
        }
    }
}

#[test]
fn two_strips_stay_in_sync_through_a_request() -> anyhow::Result<()> {
    let mut group = PagerGroup::new();

    let mut top = Pager::new();
    top.set_count(500);
    let top = group.insert("TopPager", top);
    let bottom = group.insert("BottomPager", Pager::new());
    group.link(bottom, top)?;

    // the bottom strip receives the click; the top pager handles it
    let mut notified = 0;
    group.raise_postback(bottom, "12", || notified += 1)?;
    assert_eq!(notified, 1);

    let top_items: Vec<_> = group.resolve(top)?.nav_items().collect();
    let bottom_items: Vec<_> = group.resolve(bottom)?.nav_items().collect();
    assert_eq!(top_items, bottom_items);
    assert!(top_items.contains(&NavItem::Current { number: 12 }));
    Ok(())
}
