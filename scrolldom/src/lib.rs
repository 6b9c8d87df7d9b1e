pub mod accessibility;
pub mod animation;
pub mod area;
pub mod buffer;
pub mod element;
pub mod event;
pub mod geometry;
pub mod hit;
pub mod layout;
pub mod observe;
pub mod registry;
pub mod render;
pub mod scheduler;
pub mod terminal;
pub mod text;
pub mod types;

pub use accessibility::{AriaRange, Role};
pub use area::{Parts, ScrollArea, ScrollBehavior, ScrollOptions};
pub use buffer::Buffer;
pub use element::{count_with_class, find_element, find_element_mut, Element};
pub use event::{Event, Key, Modifiers, PointerButton};
pub use geometry::{ScrollMetrics, MIN_THUMB_EXTENT};
pub use hit::{hit_path, hit_test};
pub use layout::{layout, natural_height, LayoutResult, Rect};
pub use observe::{ContentWatcher, SizeWatcher};
pub use registry::{ScrollAreas, TimerTask};
pub use scheduler::{Debounce, Scheduler, TimerHandle};
pub use terminal::Terminal;
pub use types::*;
