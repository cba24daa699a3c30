use super::*;

#[test]
fn buffer_appends_newline_per_line() {
    let handler = BufferPrintHandler::new();
    handler.println("hello");
    handler.println("");
    handler.println("world");
    assert_eq!(handler.output(), "hello\n\nworld\n");
}

#[test]
fn take_output_drains_buffer() {
    let handler = buffer_handler();
    handler.println("first");
    assert_eq!(handler.take_output(), "first\n");
    assert_eq!(handler.output(), "");

    handler.println("second");
    assert_eq!(handler.take_output(), "second\n");
}

#[test]
fn silent_and_stdout_capture_nothing() {
    let silent = silent_handler();
    silent.println("dropped");
    assert_eq!(silent.output(), "");
    assert_eq!(silent.take_output(), "");

    let stdout = PrintHandlerImpl::Stdout(StdoutPrintHandler);
    assert_eq!(stdout.output(), "");
}

#[test]
fn shared_handle_sees_same_buffer() {
    let handler = buffer_handler();
    let clone = Arc::clone(&handler);
    clone.println("via clone");
    assert_eq!(handler.output(), "via clone\n");
}
