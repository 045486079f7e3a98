use std::io;

fn main() -> io::Result<()> {
    chess_duel::console::console_top::run_stdio_loop()
}
