mod diff_for_path_enables_notes_inside_hunks;
mod diff_for_path_of_unknown_path_is_not_found;
mod diffs_batch_pages_changed_files;
mod diffs_batch_when_switched_off_is_not_found;
mod repository_requests;
mod show_name_status_for_added_and_deleted_files;
mod show_submodule_pointer_change;
mod show_unknown_revision_is_not_found;
mod view_preference_is_normalized;
