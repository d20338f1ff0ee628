//! Capability traits driven by the game loop.
//!
//! The loop owns ordered lists of `Update` and `Render` targets. Anything
//! that changes over time implements [`Update`]; anything that draws onto the
//! display surface implements [`Render`].

use std::cell::RefCell;
use std::rc::Rc;

use crate::compositor::blit_at;
use crate::surface::Surface;
use crate::types::Position;

/// Advance state by `elapsed` seconds.
pub trait Update {
    fn update(&mut self, elapsed: f32);
}

/// Draw onto a surface.
pub trait Render {
    fn render(&self, surface: &mut Surface);
}

/// Wraps a closure as an [`Update`] target.
pub struct UpdateFn<F>(pub F);

impl<F: FnMut(f32)> Update for UpdateFn<F> {
    fn update(&mut self, elapsed: f32) {
        (self.0)(elapsed)
    }
}

/// Wraps a closure as a [`Render`] target.
pub struct RenderFn<F>(pub F);

impl<F: Fn(&mut Surface)> Render for RenderFn<F> {
    fn render(&self, surface: &mut Surface) {
        (self.0)(surface)
    }
}

// Sharing between the loop and an event handler happens on the loop thread only.
impl<T: Update + ?Sized> Update for Rc<RefCell<T>> {
    fn update(&mut self, elapsed: f32) {
        self.borrow_mut().update(elapsed)
    }
}

impl<T: Render + ?Sized> Render for Rc<RefCell<T>> {
    fn render(&self, surface: &mut Surface) {
        self.borrow().render(surface)
    }
}

impl<T: Update + ?Sized> Update for Box<T> {
    fn update(&mut self, elapsed: f32) {
        (**self).update(elapsed)
    }
}

impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, surface: &mut Surface) {
        (**self).render(surface)
    }
}

/// A static surface renders itself at the top-left corner.
impl Render for Surface {
    fn render(&self, surface: &mut Surface) {
        blit_at(surface, self, Position::TOP_LEFT);
    }
}
