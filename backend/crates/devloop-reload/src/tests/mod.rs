mod event_stream;
