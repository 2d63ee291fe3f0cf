//! Author-side image-map editor.
//!
//! Turns raw pointer and keyboard input into area edits: drawing new areas,
//! selecting and dragging existing ones, deleting, and aborting a capture.

use crate::area::{hit_test, Area, AreaColor};
use crate::capture::{Capture, CaptureMode};
use crate::error::GeometryError;
use crate::point::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Delete,
    Backspace,
    Escape,
    Other,
}

/// What an input event did to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorEvent {
    Ignored,
    Selected(usize),
    CaptureStarted,
    CaptureExtended,
    AreaCommitted(usize),
    CaptureDiscarded,
    CaptureAborted,
    AreaMoved(usize),
    DragEnded(usize),
    AreaDeleted(usize),
}

#[derive(Debug, Clone)]
struct Drag {
    index: usize,
    origin: Area,
    origin_centroid: Point,
    /// Pointer position relative to the centroid at grab time.
    grab_offset: Point,
}

#[derive(Debug, Clone, Default)]
pub struct AreaEditor {
    areas: Vec<Area>,
    mode: CaptureMode,
    color: AreaColor,
    selected: Option<usize>,
    capture: Option<Capture>,
    drag: Option<Drag>,
}

impl AreaEditor {
    pub fn new(areas: Vec<Area>) -> Self {
        Self {
            areas,
            ..Self::default()
        }
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn into_areas(self) -> Vec<Area> {
        self.areas
    }

    pub fn mode(&self) -> CaptureMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: CaptureMode) {
        self.mode = mode;
    }

    /// Colour given to newly committed areas.
    pub fn set_color(&mut self, color: AreaColor) {
        self.color = color;
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn capture(&self) -> Option<&Capture> {
        self.capture.as_ref()
    }

    pub fn select(&mut self, index: usize) -> Result<(), GeometryError> {
        self.check_index(index)?;
        self.selected = Some(index);
        Ok(())
    }

    pub fn area_mut(&mut self, index: usize) -> Result<&mut Area, GeometryError> {
        self.check_index(index)?;
        Ok(&mut self.areas[index])
    }

    pub fn remove_area(&mut self, index: usize) -> Result<Area, GeometryError> {
        self.check_index(index)?;
        let removed = self.areas.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.drag = self.drag.take().and_then(|mut drag| {
            if drag.index == index {
                return None;
            }
            if drag.index > index {
                drag.index -= 1;
            }
            Some(drag)
        });
        Ok(removed)
    }

    pub fn pointer_down(&mut self, point: Point) -> EditorEvent {
        let point = point.clamped();

        if let Some(index) = hit_test(&self.areas, point) {
            self.selected = Some(index);
            let origin = self.areas[index].clone();
            // A hit implies at least three points, so a centroid exists.
            let origin_centroid = origin.centroid().unwrap_or(point);
            self.drag = Some(Drag {
                index,
                origin,
                origin_centroid,
                grab_offset: Point::new(point.x - origin_centroid.x, point.y - origin_centroid.y),
            });
            return EditorEvent::Selected(index);
        }

        self.selected = None;
        self.capture = Some(Capture::begin(self.mode, point));
        EditorEvent::CaptureStarted
    }

    pub fn pointer_move(&mut self, point: Point) -> EditorEvent {
        let point = point.clamped();

        let dragged = self.drag.as_ref().map(|drag| {
            let target = Point::new(point.x - drag.grab_offset.x, point.y - drag.grab_offset.y);
            let moved = drag.origin.translated(
                target.x - drag.origin_centroid.x,
                target.y - drag.origin_centroid.y,
            );
            (drag.index, moved)
        });
        if let Some((index, moved)) = dragged {
            return match self.areas.get_mut(index) {
                Some(slot) => {
                    *slot = moved;
                    EditorEvent::AreaMoved(index)
                }
                None => {
                    self.drag = None;
                    EditorEvent::Ignored
                }
            };
        }

        match &mut self.capture {
            Some(capture) => {
                capture.extend(point);
                EditorEvent::CaptureExtended
            }
            None => EditorEvent::Ignored,
        }
    }

    pub fn pointer_up(&mut self, point: Point) -> EditorEvent {
        if let Some(drag) = self.drag.take() {
            return EditorEvent::DragEnded(drag.index);
        }

        let Some(mut capture) = self.capture.take() else {
            return EditorEvent::Ignored;
        };
        capture.extend(point);

        match capture.finish() {
            Some(points) => {
                self.areas.push(Area::new(points).with_color(self.color));
                let index = self.areas.len() - 1;
                self.selected = Some(index);
                tracing::debug!(index, "area committed");
                EditorEvent::AreaCommitted(index)
            }
            None => EditorEvent::CaptureDiscarded,
        }
    }

    pub fn key(&mut self, key: Key) -> EditorEvent {
        match key {
            Key::Escape => match self.capture.take() {
                Some(_) => EditorEvent::CaptureAborted,
                None => EditorEvent::Ignored,
            },
            Key::Delete | Key::Backspace => {
                if self.drag.is_some() {
                    return EditorEvent::Ignored;
                }
                match self.selected.take() {
                    Some(index) if index < self.areas.len() => {
                        self.areas.remove(index);
                        EditorEvent::AreaDeleted(index)
                    }
                    _ => EditorEvent::Ignored,
                }
            }
            Key::Other => EditorEvent::Ignored,
        }
    }

    fn check_index(&self, index: usize) -> Result<(), GeometryError> {
        if index >= self.areas.len() {
            return Err(GeometryError::AreaOutOfRange {
                index,
                len: self.areas.len(),
            });
        }
        Ok(())
    }
}
