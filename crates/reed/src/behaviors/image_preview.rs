//! Shows a selected image in the element named by the input's target attribute.
//!
//! Reading the file is left to the platform: `on_change` hands out a
//! [`PreviewRequest`] ticket, the platform reads the first file as a data
//! URL and passes the result to `complete`. Each bound input keeps a
//! generation counter; a ticket from an older read than the latest one
//! started for the same input is stale and its result is dropped.

use std::cell::Cell;

use crate::config::ImagePreviewConfig;
use crate::page::Page;
use crate::selector::Selector;

const SRC: &str = "src";
const DISPLAY: &str = "display";

#[derive(Clone, Debug, PartialEq)]
pub struct PreviewRequest<E> {
    pub input: E,
    pub preview: E,
    slot: usize,
    generation: u64,
}

impl<E> PreviewRequest<E> {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Completion {
    Applied,
    Stale,
}

pub struct ImagePreview<P: Page> {
    inputs: Vec<P::Element>,
    generations: Vec<Cell<u64>>,
    target_attribute: String,
    visible_display: String,
}

impl<P: Page> ImagePreview<P> {
    pub fn new(page: &P, selector: &Selector, config: &ImagePreviewConfig) -> Self {
        let inputs = page.query_all(selector);
        let generations = inputs.iter().map(|_| Cell::new(0)).collect();
        Self {
            inputs,
            generations,
            target_attribute: config.target_attribute.clone(),
            visible_display: config.visible_display.clone(),
        }
    }

    pub fn inputs(&self) -> &[P::Element] {
        &self.inputs
    }

    /// Starts a read when the input names an existing preview and has a file.
    pub fn on_change(&self, page: &P, input: &P::Element) -> Option<PreviewRequest<P::Element>> {
        let slot = self.inputs.iter().position(|bound| bound == input)?;
        let preview_id = page
            .attribute(input, &self.target_attribute)
            .filter(|id| !id.is_empty())?;
        let Some(preview) = page.element_by_id(&preview_id) else {
            log::debug!("[ImagePreview] Preview target `{preview_id}` not found");
            return None;
        };
        if page.selected_file_count(input) == 0 {
            return None;
        }
        let generation = self.generations[slot].get() + 1;
        self.generations[slot].set(generation);
        Some(PreviewRequest {
            input: input.clone(),
            preview,
            slot,
            generation,
        })
    }

    pub fn is_current(&self, request: &PreviewRequest<P::Element>) -> bool {
        self.generations
            .get(request.slot)
            .is_some_and(|generation| generation.get() == request.generation)
    }

    pub fn complete(
        &self,
        page: &P,
        request: &PreviewRequest<P::Element>,
        data_url: &str,
    ) -> Completion {
        if !self.is_current(request) {
            log::debug!(
                "[ImagePreview] Dropping stale read #{} for {:?}",
                request.generation,
                request.input
            );
            return Completion::Stale;
        }
        page.set_attribute(&request.preview, SRC, data_url);
        page.set_style(&request.preview, DISPLAY, &self.visible_display);
        Completion::Applied
    }
}
