#[cfg(test)]
mod tests {
    use crate::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Labeled {
        flags: WidgetFlags,
        name: &'static str,
    }

    impl Widget for Labeled {
        fn flags(&self) -> WidgetFlags {
            self.flags
        }

        fn semantics(&self) -> Semantics {
            Semantics::new(Role::Button).with_label(self.name)
        }
    }

    fn named(name: &'static str, flags: WidgetFlags) -> WidgetRef {
        Rc::new(RefCell::new(Labeled { flags, name }))
    }

    fn name_of(w: &WidgetRef) -> String {
        w.borrow().semantics().label.unwrap_or_default()
    }

    #[test]
    fn test_rect_contains_half_open() {
        let rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(rect.contains(Vec2::new(10.0, 10.0)));
        assert!(rect.contains(Vec2::new(50.0, 30.0)));
        assert!(!rect.contains(Vec2::new(110.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 60.0)));
        assert!(!rect.contains(Vec2::new(5.0, 30.0)));
    }

    #[test]
    fn test_empty_rect_contains_nothing() {
        assert!(!Rect::new(0.0, 0.0, 0.0, 10.0).contains(Vec2::ZERO));
        assert!(!Rect::new(0.0, 0.0, 10.0, 0.0).contains(Vec2::ZERO));
    }

    #[test]
    fn test_rect_intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Ok(Some(Rect::new(5.0, 5.0, 5.0, 5.0))));

        let touching = Rect::new(10.0, 0.0, 5.0, 5.0);
        assert_eq!(a.intersect(&touching), Ok(None));

        let bad = Rect::new(0.0, 0.0, -1.0, 5.0);
        assert_eq!(a.intersect(&bad), Err(Error::Range));
    }

    #[test]
    fn test_rect_union() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, -5.0, 5.0, 5.0);
        assert_eq!(a.union(&b), Ok(Rect::new(0.0, -5.0, 25.0, 15.0)));
        assert_eq!(a.union(&Rect::new(0.0, 0.0, 1.0, -1.0)), Err(Error::Range));
    }

    #[test]
    fn test_vec2_ops() {
        let a = Vec2::new(3.0, 4.0);
        assert_eq!(a.length_sq(), 25.0);
        assert_eq!(a - Vec2::new(1.0, 1.0), Vec2::new(2.0, 3.0));
        assert_eq!(a * 2.0, Vec2::new(6.0, 8.0));
        assert_eq!(a.distance_sq(Vec2::ZERO), 25.0);
    }

    #[test]
    fn test_error_codes_round_trip() {
        for e in [
            Error::Unknown,
            Error::InvalidArgument,
            Error::OutOfMemory,
            Error::NotFound,
            Error::Unsupported,
            Error::State,
            Error::Range,
            Error::Busy,
            Error::Overflow,
        ] {
            assert!(e.code() < 0);
            assert_eq!(Error::from_code(e.code()), Some(e));
        }
        assert_eq!(Error::Range.code(), -9);
        assert_eq!(Error::from_code(error::OK), None);
        assert_eq!(error::status::<()>(&Ok(())), 0);
        assert_eq!(error::status::<()>(&Err(Error::Busy)), -12);
    }

    #[test]
    fn test_hit_test_prefers_last_child() {
        let root = named("root", WidgetFlags::empty());
        let a = named("a", WidgetFlags::empty());
        let b = named("b", WidgetFlags::empty());

        let tree = RenderNode::new(root, Rect::new(0.0, 0.0, 100.0, 100.0))
            .child(RenderNode::new(a, Rect::new(0.0, 0.0, 60.0, 60.0)))
            .child(RenderNode::new(b, Rect::new(40.0, 40.0, 60.0, 60.0)));

        let hit = hit_test(&tree, Vec2::new(50.0, 50.0)).unwrap().unwrap();
        assert_eq!(name_of(&hit), "b");

        let hit = hit_test(&tree, Vec2::new(10.0, 10.0)).unwrap().unwrap();
        assert_eq!(name_of(&hit), "a");

        let hit = hit_test(&tree, Vec2::new(90.0, 10.0)).unwrap().unwrap();
        assert_eq!(name_of(&hit), "root");

        assert!(hit_test(&tree, Vec2::new(150.0, 10.0)).unwrap().is_none());
    }

    #[test]
    fn test_hit_test_skips_hidden_and_disabled_subtrees() {
        let root = named("root", WidgetFlags::empty());
        let hidden = named("hidden", WidgetFlags::HIDDEN);
        let inside = named("inside", WidgetFlags::empty());
        let disabled = named("disabled", WidgetFlags::DISABLED);

        let tree = RenderNode::new(root, Rect::new(0.0, 0.0, 100.0, 100.0))
            .child(
                RenderNode::new(hidden, Rect::new(0.0, 0.0, 50.0, 50.0))
                    .child(RenderNode::new(inside, Rect::new(0.0, 0.0, 10.0, 10.0))),
            )
            .child(RenderNode::new(disabled, Rect::new(50.0, 50.0, 50.0, 50.0)));

        let hit = hit_test(&tree, Vec2::new(5.0, 5.0)).unwrap().unwrap();
        assert_eq!(name_of(&hit), "root");
        let hit = hit_test(&tree, Vec2::new(60.0, 60.0)).unwrap().unwrap();
        assert_eq!(name_of(&hit), "root");
    }

    #[test]
    fn test_hit_test_rejects_bad_nodes() {
        let tree = RenderNode::default();
        assert_eq!(hit_test(&tree, Vec2::ZERO).err(), Some(Error::InvalidArgument));

        let tree = RenderNode::new(named("r", WidgetFlags::empty()), Rect::new(0.0, 0.0, -1.0, 5.0));
        assert_eq!(hit_test(&tree, Vec2::ZERO).err(), Some(Error::Range));
    }

    #[test]
    fn test_widget_flags_focus_rules() {
        assert!(WidgetFlags::FOCUSABLE.accepts_focus());
        assert!(!(WidgetFlags::FOCUSABLE | WidgetFlags::DISABLED).accepts_focus());
        assert!(!(WidgetFlags::FOCUSABLE | WidgetFlags::HIDDEN).accepts_focus());
        assert!(!WidgetFlags::empty().accepts_focus());
    }

    #[test]
    fn test_input_kind_groups() {
        let down = InputEvent::pointer_down(2, 3.0, 4.0, 0).kind;
        assert_eq!(down.pointer().map(|p| p.position), Some(Vec2::new(3.0, 4.0)));
        assert!(!down.is_keyboard() && !down.is_window());

        let text = InputKind::Text("a".into());
        assert!(text.is_keyboard());
        assert!(text.pointer().is_none());

        assert!(InputKind::WindowBlur.is_window());
        assert!(!InputKind::WindowBlur.is_keyboard());
        assert!(!InputKind::None.is_window());
    }

    #[test]
    fn test_widget_defaults() {
        let w = named("w", WidgetFlags::empty());
        let ev = InputEvent::pointer_down(0, 1.0, 1.0, 0);
        assert_eq!(deliver(&w, &ev), Ok(false));
        assert_eq!(
            w.borrow_mut()
                .measure(MeasureSpec::Unspecified, MeasureSpec::Unspecified),
            Err(Error::Unsupported)
        );
        assert_eq!(w.borrow().semantics().role, Role::Button);
    }

    #[test]
    fn test_widget_measure_drives_layout_leaf() {
        struct Chip;
        impl Widget for Chip {
            fn flags(&self) -> WidgetFlags {
                WidgetFlags::empty()
            }
            fn measure(&mut self, w: MeasureSpec, h: MeasureSpec) -> Result<Size> {
                Ok(Size::new(w.apply(64.0), h.apply(32.0)))
            }
        }

        let mut root = LayoutNode::default().with_child(LayoutNode::for_widget(widget_ref(Chip)));
        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::AtMost(40.0),
            MeasureSpec::Unspecified,
        )
        .unwrap();
        assert_eq!(root.children()[0].measured(), Size::new(40.0, 32.0));
    }

    #[test]
    fn test_text_measure_in_leaf_callback() {
        struct Mono;
        impl TextMeasure for Mono {
            fn measure_text(&mut self, _font: FontId, text: &str) -> Result<TextMetrics> {
                Ok(TextMetrics {
                    size: Size::new(text.chars().count() as f32 * 8.0, 16.0),
                    baseline: 12.0,
                })
            }
        }

        let text = Rc::new(RefCell::new(Mono));
        let font = FontId(1);
        let mut root = LayoutNode::new(LayoutStyle::row().padding(PaddingValues::all(2.0)))
            .unwrap()
            .with_child(LayoutNode::default().with_measure(move |w, h| {
                let m = text.borrow_mut().measure_text(font, "hello")?;
                Ok(Size::new(w.apply(m.size.width), h.apply(m.size.height)))
            }));

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Unspecified,
            MeasureSpec::Unspecified,
        )
        .unwrap();
        assert_eq!(root.measured(), Size::new(44.0, 20.0));
        assert_eq!(root.children()[0].layout(), Rect::new(2.0, 2.0, 40.0, 16.0));
    }

    #[test]
    fn test_layout_idempotent() {
        let build = || {
            LayoutNode::new(
                LayoutStyle::row()
                    .wrap()
                    .align_main(taffy::JustifyContent::SpaceAround)
                    .align_cross(taffy::AlignItems::Center)
                    .padding(PaddingValues::symmetric(3.0, 1.0)),
            )
            .unwrap()
            .with_child(LayoutNode::fixed(17.0, 9.0))
            .with_child(LayoutNode::fixed(23.0, 4.0))
            .with_child(LayoutNode::fixed(31.0, 12.0))
        };

        let mut root = build();
        let w = MeasureSpec::AtMost(60.0);
        let h = MeasureSpec::Unspecified;
        compute(&mut root, TextDirection::Rtl, w, h).unwrap();
        let first: Vec<Rect> = root.children().iter().map(|c| c.layout()).collect();
        let first_size = root.measured();

        compute(&mut root, TextDirection::Rtl, w, h).unwrap();
        let second: Vec<Rect> = root.children().iter().map(|c| c.layout()).collect();
        assert_eq!(first, second);
        assert_eq!(first_size, root.measured());
    }

    #[test]
    fn test_exactly_spec_wins() {
        for content in [0.0, 5.0, 500.0] {
            let mut root = LayoutNode::default().with_child(LayoutNode::fixed(content, content));
            compute(
                &mut root,
                TextDirection::Ltr,
                MeasureSpec::Exactly(120.0),
                MeasureSpec::Exactly(7.5),
            )
            .unwrap();
            assert_eq!(root.measured(), Size::new(120.0, 7.5));
        }

        let mut leaf = LayoutNode::fixed(30.0, 30.0);
        compute(
            &mut leaf,
            TextDirection::Ltr,
            MeasureSpec::Exactly(12.0),
            MeasureSpec::Unspecified,
        )
        .unwrap();
        assert_eq!(leaf.measured().width, 12.0);
    }

    #[test]
    fn test_space_between_distribution() {
        let extents = [10.0, 20.0, 30.0];
        let m = 120.0;
        let mut root = LayoutNode::new(
            LayoutStyle::row().align_main(taffy::JustifyContent::SpaceBetween),
        )
        .unwrap();
        for e in extents {
            root.push_child(LayoutNode::fixed(e, 10.0));
        }

        compute(
            &mut root,
            TextDirection::Ltr,
            MeasureSpec::Exactly(m),
            MeasureSpec::Unspecified,
        )
        .unwrap();

        let s: f32 = extents.iter().sum();
        let gap = (m - s) / (extents.len() as f32 - 1.0);
        let mut before = 0.0;
        for (i, child) in root.children().iter().enumerate() {
            assert_eq!(child.layout().x, before + i as f32 * gap);
            before += extents[i];
        }

        let mut single = LayoutNode::new(
            LayoutStyle::row().align_main(taffy::JustifyContent::SpaceBetween),
        )
        .unwrap()
        .with_child(LayoutNode::fixed(10.0, 10.0));
        compute(
            &mut single,
            TextDirection::Ltr,
            MeasureSpec::Exactly(m),
            MeasureSpec::Unspecified,
        )
        .unwrap();
        assert_eq!(single.children()[0].layout().x, 0.0);
    }

    #[test]
    fn test_space_around_and_evenly() {
        let run = |j| {
            let mut root = LayoutNode::new(LayoutStyle::row().align_main(j))
                .unwrap()
                .with_child(LayoutNode::fixed(10.0, 10.0))
                .with_child(LayoutNode::fixed(10.0, 10.0));
            compute(
                &mut root,
                TextDirection::Ltr,
                MeasureSpec::Exactly(80.0),
                MeasureSpec::Unspecified,
            )
            .unwrap();
            root.children().iter().map(|c| c.layout().x).collect::<Vec<_>>()
        };

        // 60 free: around => gap 30, lead 15; evenly => gap 20, lead 20
        assert_eq!(run(taffy::JustifyContent::SpaceAround), vec![15.0, 55.0]);
        assert_eq!(run(taffy::JustifyContent::SpaceEvenly), vec![20.0, 50.0]);
        assert_eq!(run(taffy::JustifyContent::Center), vec![30.0, 40.0]);
        assert_eq!(run(taffy::JustifyContent::End), vec![60.0, 70.0]);
    }

    #[test]
    fn test_rtl_mirror_row() {
        let widths = [10.0, 25.0, 5.0];
        let build = |padding| {
            let mut root = LayoutNode::new(LayoutStyle::row().padding(padding)).unwrap();
            for w in widths {
                root.push_child(LayoutNode::fixed(w, 10.0));
            }
            root
        };

        let symmetric = PaddingValues::symmetric(6.0, 0.0);
        let mut ltr = build(symmetric);
        let mut rtl = build(symmetric);
        let spec = MeasureSpec::Exactly(100.0);
        compute(&mut ltr, TextDirection::Ltr, spec, MeasureSpec::Unspecified).unwrap();
        compute(&mut rtl, TextDirection::Rtl, spec, MeasureSpec::Unspecified).unwrap();

        for (l, r) in ltr.children().iter().zip(rtl.children()) {
            assert_eq!(r.layout().x, 100.0 - (l.layout().x + l.layout().w));
        }

        let asymmetric = PaddingValues {
            left: 8.0,
            right: 2.0,
            top: 0.0,
            bottom: 0.0,
        };
        let mut rtl = build(asymmetric);
        compute(&mut rtl, TextDirection::Rtl, spec, MeasureSpec::Unspecified).unwrap();
        // `left` padding binds to the right edge under RTL.
        assert_eq!(rtl.children()[0].layout().x, 100.0 - 8.0 - 10.0);
    }

    #[test]
    fn test_budget_allocator() {
        crate::init_test_logging();
        let alloc = BudgetAllocator::new(64);
        assert!(alloc.reserve(40).is_ok());
        assert_eq!(alloc.reserve(40), Err(Error::OutOfMemory));
        alloc.release(40);
        assert_eq!(alloc.in_use(), 0);
        assert_eq!(alloc.peak(), 40);
        assert_eq!(bytes_for::<u64>(usize::MAX), Err(Error::Overflow));
        assert_eq!(bytes_for::<u32>(4), Ok(16));
    }

    #[test]
    fn test_semantics_builder() {
        let s = Semantics::new(Role::Button)
            .with_label("Send")
            .with_flags(SemanticFlags::DISABLED | SemanticFlags::FOCUSABLE);
        assert!(!s.is_enabled());
        assert_eq!(s.label.as_deref(), Some("Send"));
    }
}
