mod cmd;

fn main() {
    cmd::start();
}
