use approx::assert_relative_eq;
use svg_motion::animation::AnimationKind;
use svg_motion::geometry::Point;
use svg_motion::shapes::{Ellipse, Group, Polygon, Shape};
use svg_motion::{MotionError, RenderSession, Svg};

fn animated_scene() -> Svg {
    let mut svg = Svg::new(200.0, 200.0);
    let mut square = Shape::from(Polygon::square(Point::new(0.0, 0.0), 50.0));
    square
        .add_keyframe(10u32, AnimationKind::Translation, Point::new(100.0, 0.0))
        .unwrap();
    let mut circle = Shape::from(Ellipse::circle(Point::new(100.0, 100.0), 10.0));
    circle.add_keyframe(20u32, AnimationKind::Opacity, 0.0).unwrap();
    svg.append(square);
    svg.append(circle);
    svg
}

#[test]
fn test_session_produces_one_document_per_frame() {
    let mut svg = animated_scene();
    let mut session = RenderSession::new(&mut svg);
    let mut count = 0;
    while let Some((index, document)) = session.advance().unwrap() {
        assert_eq!(index, count);
        assert!(document.starts_with("<svg"));
        assert!(document.contains("<polygon"));
        count += 1;
    }
    // frames 0 through the last keyframe, inclusive
    assert_eq!(count, 21);
}

#[test]
fn test_aborted_session_restores_the_scene() {
    let mut svg = animated_scene();
    let before = svg.clone();
    {
        let mut session = RenderSession::new(&mut svg);
        for _ in 0..5 {
            session.advance().unwrap();
        }
    }
    assert_eq!(svg, before);
}

#[test]
fn test_empty_scene_bounding_is_a_configuration_error() {
    let mut svg = Svg::new(100.0, 100.0);
    let mut session = RenderSession::new(&mut svg);
    let err = session.advance().unwrap_err();
    assert!(matches!(err, MotionError::DegenerateBounds { .. }));
    assert_eq!(err.category(), "configuration");
}

#[test]
fn test_collinear_scene_is_degenerate_too() {
    let mut svg = Svg::new(100.0, 100.0);
    svg.append(Ellipse::point(Point::new(3.0, 4.0)));
    svg.set_view_box(Point::new(0.0, 0.0), Point::new(10.0, 0.0));
    assert!(matches!(
        svg.render(),
        Err(MotionError::DegenerateBounds { .. })
    ));
}

#[test]
fn test_group_broadcasts_keyframes() {
    let mut group = Group::new();
    group.append(Ellipse::circle(Point::new(0.0, 0.0), 5.0));
    group.append(Polygon::square(Point::new(20.0, 20.0), 10.0));
    group
        .add_keyframe(10u32, AnimationKind::Translation, Point::new(0.0, 50.0))
        .unwrap();

    let mut shape = Shape::from(group);
    shape.init_animation();
    for _ in 0..10 {
        shape.tick().unwrap();
    }

    let Shape::Group(group) = &shape else {
        panic!("expected group")
    };
    let Shape::Ellipse(circle) = &group.members()[0] else {
        panic!("expected ellipse")
    };
    assert_relative_eq!(circle.center().y, 50.0, epsilon = 1e-9);
    let Shape::Polygon(square) = &group.members()[1] else {
        panic!("expected polygon")
    };
    assert_relative_eq!(square.points()[0].y, 70.0, epsilon = 1e-9);
}

#[test]
fn test_nested_groups_propagate_lifecycle() {
    let mut inner = Group::new();
    inner.append(Ellipse::circle(Point::new(0.0, 0.0), 5.0));
    let mut outer = Group::new();
    outer.append(inner);

    let mut shape = Shape::from(outer);
    shape
        .add_keyframe(4u32, AnimationKind::Translation, Point::new(8.0, 0.0))
        .unwrap();
    let before = shape.clone();
    shape.init_animation();
    for _ in 0..4 {
        shape.tick().unwrap();
    }
    let moved = shape.bounding_quadrant();
    assert_relative_eq!(moved.center().x, 8.0, epsilon = 1e-9);

    shape.reset();
    assert_eq!(shape, before);
}

#[test]
fn test_group_wrapper_carries_transform_and_style() {
    let mut group = Group::new();
    group.append(Ellipse::circle(Point::new(0.0, 0.0), 5.0));
    group.set_translation(Point::new(10.0, 20.0));
    let mut style = svg_motion::Style::default();
    style.set(Some("none"), Some("black"), None, None, None);
    group.set_style(style);

    let markup = group.svg_content();
    assert!(markup.contains("translate(10 20)"));
    assert!(markup.contains("fill=\"none\""));
    assert!(markup.contains("stroke=\"black\""));
}

#[test]
fn test_invisible_member_is_not_serialized() {
    let mut group = Group::new();
    let mut hidden = Shape::from(Ellipse::circle(Point::new(0.0, 0.0), 5.0));
    hidden.set_opacity(0.0);
    group.append(hidden);
    group.append(Polygon::square(Point::new(0.0, 0.0), 10.0));

    let markup = group.svg_content();
    assert!(!markup.contains("<ellipse"));
    assert!(markup.contains("<polygon"));
}

#[test]
fn test_scene_round_trips_through_json() {
    let svg = animated_scene();
    let serialized = serde_json::to_string(&svg).unwrap();
    let deserialized: Svg = serde_json::from_str(&serialized).unwrap();
    assert_eq!(svg, deserialized);
}

#[test]
fn test_frame_count_spans_the_whole_scene() {
    let svg = animated_scene();
    assert_eq!(svg.frame_count().index(), 20);
}
