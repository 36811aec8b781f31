mod capture;
mod encoder;
mod frame_buffer;
