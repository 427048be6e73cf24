//! Tiling Module
//!
//! Binary-split tiling. A new window halves the anchor (last focused) window
//! along its longer axis; a closing window is absorbed by the first window
//! sharing an edge with it.

use tracing::debug;

use crate::config::TilingConfig;
use crate::shared::Vector2D;
use crate::wm::client::{Client, WindowId};
use crate::wm::registry::ClientList;

/// Split axis chosen for the anchor window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Split {
    /// Side by side: anchor left, new window right
    Vertical,
    /// Stacked: anchor top, new window bottom
    Horizontal,
}

impl Split {
    /// Wider-than-tall splits vertically; square windows split horizontally.
    pub fn for_size(size: Vector2D) -> Self {
        if size.x > size.y {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }
}

pub struct Tiler {
    /// Max distance between two edges still treated as touching
    pub neighbor_tolerance: f64,
}

impl Tiler {
    pub fn new(config: &TilingConfig) -> Self {
        Self {
            neighbor_tolerance: config.neighbor_tolerance,
        }
    }

    /// Compute the geometry of a window that is about to be managed.
    ///
    /// `client` must not be in `clients` yet. Tiled windows split the
    /// `anchor` window, or take the whole `screen` when there is no anchor.
    /// Floating windows keep their geometry. The new window always ends up
    /// dirty.
    pub fn calculate_new_window_params(
        &self,
        clients: &mut ClientList,
        client: &mut Client,
        anchor: WindowId,
        screen: Vector2D,
    ) {
        if !client.floating {
            match clients.find_by_id(anchor) {
                Some(anchor) if anchor.id != client.id => split_anchor(anchor, client),
                _ => {
                    debug!("No anchor window, {} opens fullscreen", client.id);
                    client.position = Vector2D::ZERO;
                    client.size = screen;
                }
            }
        }

        client.dirty = true;
    }

    /// Let the first neighbor of `closed` take over its area.
    ///
    /// Leaves a gap when no neighbor exists.
    pub fn fix_window_on_close(&self, clients: &mut ClientList, closed: &Client) {
        let tolerance = self.neighbor_tolerance;
        let Some(neighbor) = clients
            .iter_mut()
            .filter(|c| c.id != closed.id)
            .find(|c| is_neighbor(c, closed, tolerance))
        else {
            debug!("Window {} has no neighbor, leaving its area empty", closed.id);
            return;
        };

        debug!("Window {} absorbs closed window {}", neighbor.id, closed.id);
        eat_window(neighbor, closed);
        neighbor.dirty = true;
    }
}

fn split_anchor(anchor: &mut Client, client: &mut Client) {
    let size = anchor.size;
    let position = anchor.position;

    match Split::for_size(size) {
        Split::Vertical => {
            let half = Vector2D::new(size.x / 2.0, size.y);
            anchor.size = half;
            client.size = half;
            client.position = Vector2D::new(position.x + half.x, position.y);
        }
        Split::Horizontal => {
            let half = Vector2D::new(size.x, size.y / 2.0);
            anchor.size = half;
            client.size = half;
            client.position = Vector2D::new(position.x, position.y + half.y);
        }
    }

    debug!(
        "Split {} into {:?} at {:?}, new window {} at {:?}",
        anchor.id, anchor.size, anchor.position, client.id, client.position
    );
    anchor.dirty = true;
}

fn sticks(a: f64, b: f64, tolerance: f64) -> bool {
    (a - b).abs() <= tolerance
}

/// Whether one window's left or top edge touches the other's right or bottom edge.
///
/// A coordinate of exactly 0 is never tested, so windows along the screen's
/// left or top border only match through the other window's edges.
pub fn is_neighbor(a: &Client, b: &Client, tolerance: f64) -> bool {
    let a_far = a.far_corner();
    let b_far = b.far_corner();

    (a.position.x != 0.0 && sticks(a.position.x, b_far.x, tolerance))
        || (a.position.y != 0.0 && sticks(a.position.y, b_far.y, tolerance))
        || (b.position.x != 0.0 && sticks(b.position.x, a_far.x, tolerance))
        || (b.position.y != 0.0 && sticks(b.position.y, a_far.y, tolerance))
}

/// Grow `a` to the bounding box of `a` and `eaten`.
fn eat_window(a: &mut Client, eaten: &Client) {
    let far = a.far_corner().max(eaten.far_corner());
    a.position = a.position.min(eaten.position);
    a.size = far - a.position;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SCREEN: Vector2D = Vector2D { x: 1920.0, y: 1080.0 };

    fn tiler() -> Tiler {
        Tiler::new(&TilingConfig::default())
    }

    fn tiled(id: u32, x: f64, y: f64, w: f64, h: f64) -> Client {
        let mut client = Client::new(WindowId(id));
        client.position = Vector2D::new(x, y);
        client.size = Vector2D::new(w, h);
        client
    }

    #[test]
    fn test_first_window_takes_full_screen() {
        let mut clients = ClientList::new();
        let mut client = Client::new(WindowId(1));

        tiler().calculate_new_window_params(&mut clients, &mut client, WindowId::NONE, SCREEN);

        assert_eq!(client.position, Vector2D::ZERO);
        assert_eq!(client.size, SCREEN);
        assert!(client.dirty);
    }

    #[test]
    fn test_stale_anchor_opens_fullscreen() {
        let mut clients = ClientList::new();
        clients.add(tiled(1, 0.0, 0.0, 960.0, 1080.0));
        let mut client = Client::new(WindowId(2));

        tiler().calculate_new_window_params(&mut clients, &mut client, WindowId(99), SCREEN);

        assert_eq!(client.size, SCREEN);
        assert!(!clients.get(WindowId(1)).unwrap().dirty);
    }

    #[test]
    fn test_wide_anchor_splits_vertically() {
        let mut clients = ClientList::new();
        clients.add(tiled(1, 10.0, 20.0, 200.0, 100.0));
        let mut client = Client::new(WindowId(2));

        tiler().calculate_new_window_params(&mut clients, &mut client, WindowId(1), SCREEN);

        let anchor = clients.get(WindowId(1)).unwrap();
        assert_eq!(anchor.position, Vector2D::new(10.0, 20.0));
        assert_eq!(anchor.size, Vector2D::new(100.0, 100.0));
        assert!(anchor.dirty);
        assert_eq!(client.position, Vector2D::new(110.0, 20.0));
        assert_eq!(client.size, Vector2D::new(100.0, 100.0));
        assert!(client.dirty);
    }

    #[test]
    fn test_tall_anchor_splits_horizontally() {
        let mut clients = ClientList::new();
        clients.add(tiled(1, 10.0, 20.0, 100.0, 200.0));
        let mut client = Client::new(WindowId(2));

        tiler().calculate_new_window_params(&mut clients, &mut client, WindowId(1), SCREEN);

        let anchor = clients.get(WindowId(1)).unwrap();
        assert_eq!(anchor.position, Vector2D::new(10.0, 20.0));
        assert_eq!(anchor.size, Vector2D::new(100.0, 100.0));
        assert_eq!(client.position, Vector2D::new(10.0, 120.0));
        assert_eq!(client.size, Vector2D::new(100.0, 100.0));
    }

    #[test]
    fn test_square_anchor_splits_horizontally() {
        assert_eq!(Split::for_size(Vector2D::new(100.0, 100.0)), Split::Horizontal);
        assert_eq!(Split::for_size(Vector2D::new(101.0, 100.0)), Split::Vertical);
    }

    #[test]
    fn test_floating_window_is_not_tiled() {
        let mut clients = ClientList::new();
        clients.add(tiled(1, 0.0, 0.0, 1920.0, 1080.0));
        let before: Vec<Client> = clients.iter().cloned().collect();
        let mut client = Client::floating(
            WindowId(2),
            Vector2D::new(50.0, 60.0),
            Vector2D::new(300.0, 200.0),
        );

        tiler().calculate_new_window_params(&mut clients, &mut client, WindowId(1), SCREEN);

        let after: Vec<Client> = clients.iter().cloned().collect();
        assert_eq!(before, after);
        assert_eq!(client.position, Vector2D::new(50.0, 60.0));
        assert_eq!(client.size, Vector2D::new(300.0, 200.0));
        assert!(client.dirty);
    }

    #[test]
    fn test_close_restores_parent_rectangle() {
        for (w, h) in [(200.0, 100.0), (100.0, 200.0)] {
            for close_new in [true, false] {
                let mut clients = ClientList::new();
                clients.add(tiled(1, 40.0, 30.0, w, h));
                let mut client = Client::new(WindowId(2));
                let tiler = tiler();
                tiler.calculate_new_window_params(&mut clients, &mut client, WindowId(1), SCREEN);
                clients.add(client);

                let (closing, survivor) = if close_new { (2, 1) } else { (1, 2) };
                let closed = clients.remove(WindowId(closing)).unwrap();
                tiler.fix_window_on_close(&mut clients, &closed);

                let survivor = clients.get(WindowId(survivor)).unwrap();
                assert_eq!(survivor.position, Vector2D::new(40.0, 30.0));
                assert_eq!(survivor.size, Vector2D::new(w, h));
                assert!(survivor.dirty);
            }
        }
    }

    #[test]
    fn test_close_without_neighbor_changes_nothing() {
        let mut clients = ClientList::new();
        clients.add(tiled(1, 0.0, 0.0, 100.0, 100.0));
        clients.add(tiled(2, 500.0, 500.0, 100.0, 100.0));
        let before: Vec<Client> = clients.iter().cloned().collect();

        let isolated = tiled(3, 250.0, 250.0, 50.0, 50.0);
        tiler().fix_window_on_close(&mut clients, &isolated);

        let after: Vec<Client> = clients.iter().cloned().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn test_first_neighbor_wins() {
        let mut clients = ClientList::new();
        // Both 1 and 2 touch the closing window's left edge at x = 100
        clients.add(tiled(1, 0.0, 0.0, 100.0, 50.0));
        clients.add(tiled(2, 0.0, 50.0, 100.0, 50.0));
        let closed = tiled(3, 100.0, 0.0, 100.0, 100.0);

        tiler().fix_window_on_close(&mut clients, &closed);

        let first = clients.get(WindowId(1)).unwrap();
        assert_eq!(first.position, Vector2D::ZERO);
        assert_eq!(first.size, Vector2D::new(200.0, 100.0));
        assert!(first.dirty);
        assert!(!clients.get(WindowId(2)).unwrap().dirty);
    }

    #[test]
    fn test_neighbor_within_tolerance() {
        let a = tiled(1, 0.0, 0.0, 100.0, 100.0);
        let b = tiled(2, 101.0, 0.0, 100.0, 100.0);
        let c = tiled(3, 103.0, 0.0, 100.0, 100.0);

        assert!(is_neighbor(&a, &b, 1.0));
        assert!(is_neighbor(&b, &a, 1.0));
        assert!(!is_neighbor(&a, &c, 1.0));
    }

    #[test]
    fn test_zero_coordinates_are_not_tested() {
        // b ends exactly where a starts, but a sits on the origin so its
        // left/top edges are never compared.
        let a = tiled(1, 0.0, 0.0, 100.0, 100.0);
        let b = tiled(2, -100.0, -100.0, 100.0, 100.0);

        assert!(!is_neighbor(&a, &b, 1.0));
    }
}
