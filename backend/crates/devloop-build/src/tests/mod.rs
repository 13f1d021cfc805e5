#[cfg(unix)]
mod build_command;
mod classify;

use std::path::PathBuf;

pub(crate) fn make_event(paths: Vec<&str>, kind: notify::EventKind) -> notify::Event {
    notify::Event {
        kind,
        paths: paths.into_iter().map(PathBuf::from).collect(),
        attrs: Default::default(),
    }
}

pub(crate) fn modify_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Data(
        notify::event::DataChange::Any,
    ))
}

pub(crate) fn metadata_kind() -> notify::EventKind {
    notify::EventKind::Modify(notify::event::ModifyKind::Metadata(
        notify::event::MetadataKind::WriteTime,
    ))
}

pub(crate) fn create_kind() -> notify::EventKind {
    notify::EventKind::Create(notify::event::CreateKind::File)
}

pub(crate) fn remove_kind() -> notify::EventKind {
    notify::EventKind::Remove(notify::event::RemoveKind::File)
}
