use std::collections::{HashMap, VecDeque};
use egui::TextureHandle;

#[derive(Clone)]
pub enum Slot {
    Ready(TextureHandle),
    // No se reintenta
    Failed,
}

pub struct ImageCache {
    slots: HashMap<String, Slot>,
    max_cache_size: usize,
    access_order: VecDeque<String>,
}

impl ImageCache {
    pub fn new(max_size: usize) -> Self {
        Self {
            slots: HashMap::new(),
            max_cache_size: max_size.max(1),
            access_order: VecDeque::new(),
        }
    }

    pub fn get(&mut self, source: &str) -> Option<&Slot> {
        if !self.slots.contains_key(source) {
            return None;
        }
        self.touch(source);
        self.slots.get(source)
    }

    pub fn insert(&mut self, source: String, texture: TextureHandle) {
        self.put(source, Slot::Ready(texture));
    }

    pub fn insert_failed(&mut self, source: String) {
        self.put(source, Slot::Failed);
    }

    fn put(&mut self, source: String, slot: Slot) {
        if self.slots.contains_key(&source) {
            self.touch(&source);
        } else {
            while self.slots.len() >= self.max_cache_size {
                let Some(oldest) = self.access_order.pop_front() else {
                    break;
                };
                self.slots.remove(&oldest);
            }
            self.access_order.push_back(source.clone());
        }
        self.slots.insert(source, slot);
    }

    fn touch(&mut self, source: &str) {
        if let Some(pos) = self.access_order.iter().position(|p| p == source) {
            if let Some(key) = self.access_order.remove(pos) {
                self.access_order.push_back(key);
            }
        }
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.access_order.clear();
    }

    pub fn contains(&self, source: &str) -> bool {
        self.slots.contains_key(source)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }
}
