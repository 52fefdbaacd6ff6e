pub(crate) mod row_window;
