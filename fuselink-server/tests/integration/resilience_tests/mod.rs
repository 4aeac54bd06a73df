mod test_binary_frames;
