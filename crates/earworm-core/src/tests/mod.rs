mod matcher;
mod surface;
