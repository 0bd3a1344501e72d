mod structures;
