use super::*;

#[test]
fn width_tracks_label_and_height_is_fixed() {
    for w in [0.0, 17.5, 160.0, 900.0] {
        let g = cta_button_geometry(Point::new(190.0, 320.0), w);
        assert_eq!(g.rect.width(), w + 100.0);
        assert_eq!(g.rect.height(), 100.0);
        assert_eq!(g.corner_radius, 30.0);
        assert_eq!(g.rect.origin(), Point::new(190.0, 320.0));
    }
}

#[test]
fn label_is_centered_in_the_button() {
    let g = cta_button_geometry(Point::new(190.0, 320.0), 160.0);
    assert_eq!(g.label_center, Point::new(190.0 + 80.0 + 50.0, 370.0));
    assert_eq!(g.label_center, g.rect.center());
}
